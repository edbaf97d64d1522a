//! The `lectern grade` command.

use std::path::PathBuf;

use anyhow::Result;

use lectern_core::assembly::AssembledTest;
use lectern_core::submission::{load_answers, score_submission};
use lectern_core::Grader;

use crate::config::load_config_from;

pub fn execute(
    test_path: PathBuf,
    answers_path: PathBuf,
    threshold: Option<f64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let grader = Grader::with_threshold(threshold.unwrap_or(config.threshold))?;

    let test = AssembledTest::load_json(&test_path)?;
    let answers = load_answers(&answers_path)?;

    let outcome = score_submission(&test, &answers, &grader);

    for record in &outcome.answers {
        let mark = if record.is_correct { "CORRECT" } else { "WRONG" };
        println!("  [{}] {mark}: {}", record.question_id, record.user_answer);
    }
    if outcome.unanswered() > 0 {
        println!("  {} question(s) unanswered", outcome.unanswered());
    }
    println!(
        "\nScore: {}/{} ({:.1}%)",
        outcome.correct, outcome.total, outcome.score
    );

    let output = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("outcome-{}.json", outcome.test_id))
    });
    outcome.save_json(&output)?;
    println!("Outcome saved to {}", output.display());

    Ok(())
}
