//! The `lectern export` command.

use std::path::PathBuf;

use anyhow::Result;

use lectern_core::assembly::AssembledTest;
use lectern_export::{write_export, ExportFormat, ExportOptions};

pub fn execute(
    test_path: PathBuf,
    with_answers: bool,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let test = AssembledTest::load_json(&test_path)?;

    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("test-{}.{}", test.id, format.extension())));
    write_export(&test, format, &ExportOptions { with_answers }, &output)?;
    println!("{format} export written to {}", output.display());

    Ok(())
}
