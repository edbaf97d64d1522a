//! Grade answers example: minimal programmatic usage of lectern-core.
//!
//! Extracts concepts from a short lecture, assembles a quiz from a question
//! bank, and grades a set of answers against it.
//!
//! ```bash
//! cargo run -p lectern-core --example grade_answers
//! # or with your own bank:
//! cargo run -p lectern-core --example grade_answers -- banks/cell-biology.toml
//! ```

use std::env;
use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use lectern_core::assembly::{assemble, TestSpec};
use lectern_core::parser;
use lectern_core::submission::{score_submission, Submission};
use lectern_core::{summarize, ConceptExtractor, Grader};

const LECTURE: &str = "
Photosynthesis takes place in the chloroplast.
The chloroplast captures light; photosynthesis turns it into glucose.
Mitochondria then burn glucose to make ATP.
";

fn main() -> anyhow::Result<()> {
    // Concepts and summary from raw text
    let extractor = ConceptExtractor::default();
    println!("Summary: {}", summarize(LECTURE));
    for concept in extractor.extract(LECTURE, 3) {
        println!("  {}", concept.description);
    }

    // Assemble a reproducible quiz from a bank
    let bank_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("banks/cell-biology.toml"));
    let bank = parser::parse_bank(&bank_path)?;
    let mut rng = SmallRng::seed_from_u64(7);
    let test = assemble(&bank, &TestSpec::default(), &mut rng)?;
    println!("\nTest {} from '{}':", test.id, bank.name);

    // Answer every question with a slightly misspelled correct answer
    let answers: Vec<Submission> = test
        .items
        .iter()
        .map(|q| {
            let mut answer = q.correct_answer.clone();
            if answer.len() > 6 {
                answer.pop();
            }
            Submission::new(q.id.clone(), answer)
        })
        .collect();

    for threshold in [0.85, 1.0] {
        let grader = Grader::with_threshold(threshold)?;
        let outcome = score_submission(&test, &answers, &grader);
        println!(
            "threshold {threshold:.2}: {}/{} correct ({:.1}%)",
            outcome.correct, outcome.total, outcome.score
        );
    }

    Ok(())
}
