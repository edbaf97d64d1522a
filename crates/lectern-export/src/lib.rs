//! lectern-export — printable renderings of assembled tests.

pub mod html;
pub mod text;

use std::fmt;
use std::str::FromStr;

/// Options shared by every export format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Print the correct answer under each question.
    pub with_answers: bool,
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Text,
}

impl ExportFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Render `test` in `format` and write it to `path`.
pub fn write_export(
    test: &lectern_core::assembly::AssembledTest,
    format: ExportFormat,
    options: &ExportOptions,
    path: &std::path::Path,
) -> anyhow::Result<()> {
    match format {
        ExportFormat::Html => html::write_html_export(test, options, path),
        ExportFormat::Text => text::write_text_export(test, options, path),
    }
}
