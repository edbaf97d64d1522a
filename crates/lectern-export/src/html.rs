//! Printable HTML export.
//!
//! Produces a self-contained HTML file with all CSS inlined, laid out for
//! printing on A4 paper.

use anyhow::Result;
use std::path::Path;

use lectern_core::assembly::AssembledTest;

use crate::ExportOptions;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate a printable HTML page for a test.
pub fn generate_html(test: &AssembledTest, options: &ExportOptions) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Test {}</title>\n", test.id));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>Test ID: {}</h1>\n", test.id));
    let bank = if test.bank_name.is_empty() {
        &test.bank_id
    } else {
        &test.bank_name
    };
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} questions | {}</p>\n",
        html_escape(bank),
        test.items.len(),
        test.created_at.format("%Y-%m-%d")
    ));
    html.push_str("<p class=\"meta\">Name: <span class=\"blank\"></span></p>\n");
    html.push_str("</header>\n");

    html.push_str("<ol class=\"questions\">\n");
    for q in &test.items {
        html.push_str("<li class=\"question\">\n");
        html.push_str(&format!("<p class=\"prompt\">{}</p>\n", html_escape(&q.prompt)));

        let mut opts = q.sorted_options().peekable();
        if opts.peek().is_some() {
            html.push_str("<ul class=\"options\">\n");
            for (label, text) in opts {
                html.push_str(&format!(
                    "<li>{}) {}</li>\n",
                    html_escape(label),
                    html_escape(text)
                ));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("<div class=\"answer-line\"></div>\n");

        if options.with_answers && !q.correct_answer.is_empty() {
            html.push_str(&format!(
                "<p class=\"answer\">Answer: {}</p>\n",
                html_escape(&q.correct_answer)
            ));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ol>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write a printable HTML test to a file.
pub fn write_html_export(test: &AssembledTest, options: &ExportOptions, path: &Path) -> Result<()> {
    let html = generate_html(test, options);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
@page { size: A4; margin: 2cm; }
body { font-family: Helvetica, Arial, sans-serif; font-size: 11pt; margin: 0; padding: 2rem; color: #111; }
h1 { font-size: 16pt; margin: 0 0 0.5rem 0; }
.meta { color: #4b5563; margin: 0.2rem 0; }
.blank { display: inline-block; width: 8cm; border-bottom: 1px solid #111; }
ol.questions { padding-left: 1.5rem; }
li.question { margin: 1.2rem 0; break-inside: avoid; page-break-inside: avoid; }
.prompt { margin: 0 0 0.4rem 0; }
ul.options { list-style: none; padding-left: 0.5cm; margin: 0.2rem 0; }
ul.options li { margin: 0.2rem 0; }
.answer-line { border-bottom: 1px solid #111; height: 0.8cm; }
.answer { font-style: italic; font-size: 10pt; margin: 0.3rem 0 0 0; }
@media print { body { padding: 0; } }
"#;
