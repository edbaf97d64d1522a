//! Plain-text export, for terminals and plain printers.

use anyhow::Result;
use std::path::Path;

use lectern_core::assembly::AssembledTest;

use crate::ExportOptions;

const LINE_WIDTH: usize = 72;

/// Render a test as plain text.
pub fn generate_text(test: &AssembledTest, options: &ExportOptions) -> String {
    let rule = "_".repeat(LINE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("Test ID: {}\n", test.id));
    if !test.bank_name.is_empty() {
        out.push_str(&format!("{}\n", test.bank_name));
    }
    out.push('\n');

    for (n, q) in test.items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", n + 1, q.prompt));
        for (label, text) in q.sorted_options() {
            out.push_str(&format!("   {label}) {text}\n"));
        }
        out.push_str(&rule);
        out.push('\n');
        if options.with_answers && !q.correct_answer.is_empty() {
            out.push_str(&format!("Answer: {}\n", q.correct_answer));
        }
        out.push('\n');
    }

    out
}

/// Write a plain-text test to a file.
pub fn write_text_export(test: &AssembledTest, options: &ExportOptions, path: &Path) -> Result<()> {
    let text = generate_text(test, options);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}
