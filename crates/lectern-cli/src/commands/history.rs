//! The `lectern history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lectern_core::submission::{load_outcomes, TestOutcome};

use crate::config::load_config_from;

pub fn execute(
    dir: Option<PathBuf>,
    test_id: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => load_config_from(config_path.as_deref())?.output_dir,
    };
    let outcomes = load_outcomes(&dir)?;

    if let Some(id) = test_id {
        let outcome = outcomes
            .iter()
            .find(|o| o.test_id.to_string().starts_with(&id))
            .ok_or_else(|| anyhow::anyhow!("no graded test '{id}' in {}", dir.display()))?;
        print_outcome(outcome);
        return Ok(());
    }

    if outcomes.is_empty() {
        println!("No graded tests in {}.", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Test", "Graded at", "Correct/Total", "Score"]);
    for outcome in &outcomes {
        table.add_row(vec![
            Cell::new(outcome.test_id),
            Cell::new(outcome.graded_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(format!("{}/{}", outcome.correct, outcome.total)),
            Cell::new(format!("{:.1}%", outcome.score)),
        ]);
    }
    println!("{table}");
    println!("{} graded test(s)", outcomes.len());

    Ok(())
}

fn print_outcome(outcome: &TestOutcome) {
    println!("Test {}", outcome.test_id);
    println!("Graded at {}", outcome.graded_at.format("%Y-%m-%d %H:%M:%S"));

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answer", "Result"]);
    for record in &outcome.answers {
        table.add_row(vec![
            Cell::new(&record.question_id),
            Cell::new(&record.user_answer),
            Cell::new(if record.is_correct { "correct" } else { "wrong" }),
        ]);
    }
    println!("{table}");
    println!(
        "Score: {}/{} ({:.1}%)",
        outcome.correct, outcome.total, outcome.score
    );
}
