//! The `lectern assemble` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use lectern_core::assembly::{assemble, TestSpec};
use lectern_core::parser;

pub fn execute(
    bank_path: PathBuf,
    count: usize,
    difficulty: Option<u8>,
    seed: Option<u64>,
    output: PathBuf,
) -> Result<()> {
    let bank = parser::parse_bank(&bank_path)?;

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let spec = TestSpec {
        num_questions: count,
        difficulty,
    };
    let test = match assemble(&bank, &spec, &mut rng) {
        Ok(test) => test,
        Err(e) if !e.is_contract_violation() => {
            anyhow::bail!(
                "{e} in '{}' ({} questions); try another --difficulty",
                bank.id,
                bank.questions.len()
            );
        }
        Err(e) => {
            return Err(e).with_context(|| format!("cannot assemble a test from '{}'", bank.id))
        }
    };

    if test.items.len() < count {
        eprintln!(
            "Warning: requested {count} questions but only {} matched.",
            test.items.len()
        );
    }

    test.save_json(&output)?;

    println!("Test {} ({} questions)", test.id, test.items.len());
    for (n, item) in test.item_views().iter().enumerate() {
        println!("{}. [{}] {}", n + 1, item.question_type, item.prompt);
        for (label, text) in item.options.iter().flatten() {
            println!("   {label}) {text}");
        }
    }
    println!("\nTest saved to {}", output.display());

    Ok(())
}
