//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lectern() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.env_remove("LECTERN_THRESHOLD")
        .env_remove("LECTERN_MAX_CONCEPTS");
    cmd
}

/// A command running in `dir` with no user-level config in reach.
fn lectern_in(dir: &Path) -> Command {
    let mut cmd = lectern();
    cmd.current_dir(dir).env("HOME", dir);
    cmd
}

#[test]
fn validate_valid_bank() {
    lectern()
        .arg("validate")
        .arg("--bank")
        .arg("../../banks/cell-biology.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cell Biology (6 questions)"))
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn validate_directory() {
    lectern()
        .arg("validate")
        .arg("--bank")
        .arg("../../banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cell Biology"))
        .stdout(predicate::str::contains("World Geography (5 questions)"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bad.toml");
    std::fs::write(
        &bank,
        r#"
[bank]
id = "bad"
name = "Bad Bank"

[[questions]]
id = "pick"
type = "mcq"
prompt = "Pick the capital"
correct_answer = "B"

[questions.options]
A = "Lyon"
B = "Paris"
"#,
    )
    .unwrap();

    lectern()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("[pick] WARNING"))
        .stdout(predicate::str::contains("option label"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_unknown_question_type() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("ox.toml");
    std::fs::write(
        &bank,
        r#"
[bank]
id = "ox"
name = "True or false"

[[questions]]
id = "q1"
type = "ox"
prompt = "The sun is a star"
correct_answer = "O"
"#,
    )
    .unwrap();

    lectern()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question type"));
}

#[test]
fn validate_nonexistent_file() {
    lectern()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    lectern_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lectern.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"));

    assert!(dir.path().join("lectern.toml").exists());
    assert!(dir.path().join("banks/example.toml").exists());

    lectern_in(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    lectern_in(dir.path()).arg("init").assert().success();

    lectern_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn assemble_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    for out in [&first, &second] {
        lectern()
            .arg("assemble")
            .arg("--bank")
            .arg("../../banks/cell-biology.toml")
            .arg("--count")
            .arg("4")
            .arg("--seed")
            .arg("42")
            .arg("--output")
            .arg(out)
            .assert()
            .success()
            .stdout(predicate::str::contains("(4 questions)"));
    }

    let ids = |path: &Path| -> Vec<String> {
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        json["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(ids(&first).len(), 4);
}

#[test]
fn assemble_filters_by_difficulty() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("easy.json");

    lectern()
        .arg("assemble")
        .arg("--bank")
        .arg("../../banks/cell-biology.toml")
        .arg("--count")
        .arg("10")
        .arg("--difficulty")
        .arg("1")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("only 2 matched"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["difficulty"] == 1));
}

#[test]
fn assemble_without_matches_fails() {
    let dir = TempDir::new().unwrap();

    lectern()
        .arg("assemble")
        .arg("--bank")
        .arg("../../banks/world-geography.toml")
        .arg("--difficulty")
        .arg("5")
        .arg("--output")
        .arg(dir.path().join("none.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions found with difficulty 5"))
        .stderr(predicate::str::contains("try another --difficulty"));

    assert!(!dir.path().join("none.json").exists());
}

#[test]
fn assemble_zero_questions_fails() {
    let dir = TempDir::new().unwrap();

    lectern()
        .arg("assemble")
        .arg("--bank")
        .arg("../../banks/world-geography.toml")
        .arg("--count")
        .arg("0")
        .arg("--output")
        .arg(dir.path().join("zero.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one question"));
}

#[test]
fn grade_rejects_invalid_threshold() {
    let dir = TempDir::new().unwrap();
    let test = dir.path().join("test.json");
    let answers = dir.path().join("answers.toml");

    lectern()
        .arg("assemble")
        .arg("--bank")
        .arg("../../banks/world-geography.toml")
        .arg("--output")
        .arg(&test)
        .assert()
        .success();
    std::fs::write(&answers, "answers = []\n").unwrap();

    lectern_in(dir.path())
        .arg("grade")
        .arg("--test")
        .arg(&test)
        .arg("--answers")
        .arg(&answers)
        .arg("--threshold")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn threshold_env_override_is_validated() {
    let dir = TempDir::new().unwrap();

    lectern_in(dir.path())
        .env("LECTERN_THRESHOLD", "loose")
        .arg("grade")
        .arg("--test")
        .arg("missing.json")
        .arg("--answers")
        .arg("missing.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid LECTERN_THRESHOLD"));
}

#[test]
fn export_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let test = dir.path().join("test.json");

    lectern()
        .arg("assemble")
        .arg("--bank")
        .arg("../../banks/world-geography.toml")
        .arg("--output")
        .arg(&test)
        .assert()
        .success();

    lectern()
        .arg("export")
        .arg("--test")
        .arg(&test)
        .arg("--format")
        .arg("pdf")
        .arg("--output")
        .arg(dir.path().join("test.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format: pdf"));
}

#[test]
fn extract_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    lectern_in(dir.path())
        .arg("extract")
        .arg("--input")
        .arg("no-such-notes.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("document not found"));
}

#[test]
fn history_without_outcomes() {
    let dir = TempDir::new().unwrap();

    lectern_in(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No graded tests"));
}

#[test]
fn history_unknown_test_fails() {
    let dir = TempDir::new().unwrap();

    lectern_in(dir.path())
        .arg("history")
        .arg("--test")
        .arg("ffffffff")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no graded test 'ffffffff'"));
}

#[test]
fn help_output() {
    lectern()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lecture study aid"));
}

#[test]
fn version_output() {
    lectern()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lectern"));
}
