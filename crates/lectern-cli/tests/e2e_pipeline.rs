//! End-to-end pipeline tests driving the binary through a whole study session:
//! extract concepts from notes, assemble a test, grade answers, export it.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lectern(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("LECTERN_THRESHOLD")
        .env_remove("LECTERN_MAX_CONCEPTS");
    cmd
}

fn bank_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../banks/cell-biology.toml")
}

/// Assemble every question of the cell biology bank into `dir/test.json`.
fn assemble_full_test(dir: &Path) -> serde_json::Value {
    lectern(dir)
        .arg("assemble")
        .arg("--bank")
        .arg(bank_path())
        .arg("--count")
        .arg("6")
        .arg("--seed")
        .arg("7")
        .arg("--output")
        .arg("test.json")
        .assert()
        .success();

    serde_json::from_str(&std::fs::read_to_string(dir.join("test.json")).unwrap()).unwrap()
}

const LECTURE: &str = "\
Mitochondria are the powerhouse of the cell.
Mitochondria produce energy for the cell membrane pumps.

The membrane keeps mitochondria and other organelles inside.
";

#[test]
fn e2e_extract_concepts_from_notes() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes");
    std::fs::create_dir_all(&notes).unwrap();
    std::fs::write(notes.join("week1.txt"), LECTURE).unwrap();
    std::fs::write(notes.join("slides.pdf"), b"%PDF-1.4").unwrap();

    lectern(dir.path())
        .arg("extract")
        .arg("--input")
        .arg("notes")
        .arg("--max-concepts")
        .arg("2")
        .arg("--output")
        .arg("analysis.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("mitochondria"))
        .stdout(predicate::str::contains("Summary: Mitochondria are the powerhouse"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("analysis.json")).unwrap())
            .unwrap();
    // the pdf is not a text document and never reaches the engine
    let documents = report["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);

    let doc = &documents[0];
    assert_eq!(doc["status"]["state"], "parsed");
    let keywords: Vec<&str> = doc["concepts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["keyword"].as_str().unwrap())
        .collect();
    assert_eq!(keywords, ["mitochondria", "cell"]);

    let questions = doc["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["concept"], "mitochondria");
    assert_eq!(questions[0]["correct_answer"], "4");
}

#[test]
fn e2e_extract_respects_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("week1.md"), LECTURE).unwrap();
    std::fs::write(
        dir.path().join("lectern.toml"),
        "max_concepts = 1\nextra_stopwords = [\"mitochondria\"]\n",
    )
    .unwrap();

    lectern(dir.path())
        .arg("extract")
        .arg("--input")
        .arg("week1.md")
        .assert()
        .success()
        .stdout(predicate::str::contains("cell"))
        .stderr(predicate::str::contains("Analysis saved to"));

    // without --output the analysis lands in the configured output directory
    let saved = std::fs::read_dir(dir.path().join("lectern-results"))
        .unwrap()
        .count();
    assert_eq!(saved, 1);
}

#[test]
fn e2e_unsupported_document_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("slides.pdf"), b"%PDF-1.4").unwrap();

    lectern(dir.path())
        .arg("extract")
        .arg("--input")
        .arg("slides.pdf")
        .arg("--output")
        .arg("analysis.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document type: .pdf"))
        .stderr(predicate::str::contains("no documents could be parsed"));
}

#[test]
fn e2e_assemble_grade_perfect_score() {
    let dir = TempDir::new().unwrap();
    let test = assemble_full_test(dir.path());

    let mut answers = String::new();
    for item in test["items"].as_array().unwrap() {
        answers.push_str(&format!(
            "[[answers]]\nquestion_id = {}\nanswer = {}\n\n",
            item["id"], item["correct_answer"]
        ));
    }
    std::fs::write(dir.path().join("answers.toml"), answers).unwrap();

    lectern(dir.path())
        .arg("grade")
        .arg("--test")
        .arg("test.json")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--output")
        .arg("outcome.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 6/6 (100.0%)"));

    let outcome: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("outcome.json")).unwrap())
            .unwrap();
    assert_eq!(outcome["correct"], 6);
    assert_eq!(outcome["total"], 6);
    assert_eq!(outcome["test_id"], test["id"]);
}

#[test]
fn e2e_grade_json_answers() {
    let dir = TempDir::new().unwrap();
    assemble_full_test(dir.path());

    let answers = r#"[
        {"question_id": "atp-organelle", "answer": "  mitocondria. "},
        {"question_id": "photosynthesis-site", "answer": "B"},
        {"question_id": "protein-synthesis", "answer": "A"},
        {"question_id": "atp-organelle", "answer": "Golgi"},
        {"question_id": "not-in-test", "answer": "anything"}
    ]"#;
    std::fs::write(dir.path().join("answers.json"), answers).unwrap();

    lectern(dir.path())
        .arg("grade")
        .arg("--test")
        .arg("test.json")
        .arg("--answers")
        .arg("answers.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("[atp-organelle] CORRECT: mitocondria."))
        .stdout(predicate::str::contains("[protein-synthesis] WRONG: A"))
        .stdout(predicate::str::contains("3 question(s) unanswered"))
        .stdout(predicate::str::contains("Score: 2/6 (33.3%)"));

    // default save location comes from the config
    assert_eq!(
        std::fs::read_dir(dir.path().join("lectern-results"))
            .unwrap()
            .count(),
        1
    );
}

#[test]
fn e2e_strict_threshold_rejects_typo() {
    let dir = TempDir::new().unwrap();
    assemble_full_test(dir.path());
    std::fs::write(
        dir.path().join("answers.toml"),
        "[[answers]]\nquestion_id = \"atp-organelle\"\nanswer = \"Mitocondria\"\n",
    )
    .unwrap();

    lectern(dir.path())
        .arg("grade")
        .arg("--test")
        .arg("test.json")
        .arg("--answers")
        .arg("answers.toml")
        .arg("--threshold")
        .arg("1.0")
        .arg("--output")
        .arg("outcome.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/6 (0.0%)"));
}

#[test]
fn e2e_export_html_and_text() {
    let dir = TempDir::new().unwrap();
    let test = assemble_full_test(dir.path());
    let test_id = test["id"].as_str().unwrap();

    lectern(dir.path())
        .arg("export")
        .arg("--test")
        .arg("test.json")
        .arg("--output")
        .arg("print/test.html")
        .assert()
        .success()
        .stdout(predicate::str::contains("html export written"));

    let html = std::fs::read_to_string(dir.path().join("print/test.html")).unwrap();
    assert!(html.contains(&format!("Test ID: {test_id}")));
    assert!(html.contains("B) Chloroplast"));
    assert!(!html.contains("Answer:"));

    lectern(dir.path())
        .arg("export")
        .arg("--test")
        .arg("test.json")
        .arg("--format")
        .arg("text")
        .arg("--with-answers")
        .arg("--output")
        .arg("test.txt")
        .assert()
        .success();

    let text = std::fs::read_to_string(dir.path().join("test.txt")).unwrap();
    assert!(text.starts_with(&format!("Test ID: {test_id}\nCell Biology\n")));
    assert!(text.contains("1. "));
    assert!(text.contains("6. "));
    assert!(text.contains("Answer: Mitochondria"));
    assert!(text.contains("Answer: Chloroplast"));
}

#[test]
fn e2e_oversized_document_is_skipped() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes");
    std::fs::create_dir_all(&notes).unwrap();
    std::fs::write(notes.join("week1.txt"), LECTURE).unwrap();
    std::fs::write(notes.join("dump.txt"), "a".repeat(1024 * 1024 + 1)).unwrap();
    std::fs::write(dir.path().join("lectern.toml"), "max_document_mb = 1\n").unwrap();

    lectern(dir.path())
        .arg("extract")
        .arg("--input")
        .arg("notes")
        .arg("--output")
        .arg("analysis.json")
        .assert()
        .success()
        .stderr(predicate::str::contains("document too large: 1048577 bytes"))
        .stdout(predicate::str::contains("mitochondria"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("analysis.json")).unwrap())
            .unwrap();
    // sorted input order: dump.txt, week1.txt
    assert_eq!(report["documents"][0]["status"]["state"], "error");
    assert_eq!(report["documents"][1]["status"]["state"], "parsed");
}

#[test]
fn e2e_history_lists_graded_tests_newest_first() {
    let dir = TempDir::new().unwrap();
    let test = assemble_full_test(dir.path());
    let test_id = test["id"].as_str().unwrap().to_string();

    std::fs::write(dir.path().join("wrong.toml"), "answers = []\n").unwrap();
    let mut right = String::new();
    for item in test["items"].as_array().unwrap() {
        right.push_str(&format!(
            "[[answers]]\nquestion_id = {}\nanswer = {}\n\n",
            item["id"], item["correct_answer"]
        ));
    }
    std::fs::write(dir.path().join("right.toml"), right).unwrap();

    for (answers, saved) in [("wrong.toml", "first.json"), ("right.toml", "second.json")] {
        lectern(dir.path())
            .arg("grade")
            .arg("--test")
            .arg("test.json")
            .arg("--answers")
            .arg(answers)
            .arg("--output")
            .arg(format!("lectern-results/{saved}"))
            .assert()
            .success();
    }

    let output = lectern(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Graded at"))
        .stdout(predicate::str::contains("2 graded test(s)"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let newest = stdout.find("6/6").unwrap();
    let oldest = stdout.find("0/6").unwrap();
    assert!(newest < oldest, "expected newest first:\n{stdout}");
    assert!(stdout.contains(&test_id));

    lectern(dir.path())
        .arg("history")
        .arg("--test")
        .arg(&test_id[..8])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Test {test_id}")))
        .stdout(predicate::str::contains("atp-organelle"))
        .stdout(predicate::str::contains("Score:"));
}

#[test]
fn e2e_export_default_filename() {
    let dir = TempDir::new().unwrap();
    let test = assemble_full_test(dir.path());
    let test_id = test["id"].as_str().unwrap();

    lectern(dir.path())
        .arg("export")
        .arg("--test")
        .arg("test.json")
        .arg("--format")
        .arg("text")
        .assert()
        .success();

    assert!(dir.path().join(format!("test-{test_id}.txt")).exists());
}
