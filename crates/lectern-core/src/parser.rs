//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::grading::normalize;
use crate::model::{Question, QuestionBank, QuestionType, DEFAULT_DIFFICULTY};

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    concept: String,
    #[serde(rename = "type")]
    question_type: String,
    prompt: String,
    #[serde(default)]
    correct_answer: String,
    #[serde(default)]
    options: Option<BTreeMap<String, String>>,
    #[serde(default = "default_difficulty")]
    difficulty: u8,
}

fn default_difficulty() -> u8 {
    DEFAULT_DIFFICULTY
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let question_type: QuestionType = q
                .question_type
                .parse()
                .with_context(|| format!("question {}", q.id))?;

            Ok(Question {
                id: q.id,
                concept: q.concept,
                question_type,
                prompt: q.prompt,
                correct_answer: q.correct_answer,
                options: q.options,
                difficulty: q.difficulty,
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid question in {}", source_path.display()))?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` question bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank from a file, or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a question bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &bank.questions {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "prompt is empty"));
        }

        if !(1..=5).contains(&q.difficulty) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("difficulty {} is outside 1-5", q.difficulty),
            ));
        }

        let has_options = q.options.as_ref().is_some_and(|o| !o.is_empty());
        match q.question_type {
            QuestionType::MultipleChoice if !has_options => {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    "multiple-choice question has no options",
                ));
            }
            QuestionType::MultipleChoice => {
                // Graders substitute a chosen label with its text, so the
                // answer key has to be an option text.
                let expected = normalize(&q.correct_answer);
                let reachable = q.sorted_options().any(|(_, text)| normalize(text) == expected);
                if !reachable {
                    let message = if q.option_text(&q.correct_answer).is_some() {
                        format!(
                            "correct answer {:?} is an option label; use the option text",
                            q.correct_answer
                        )
                    } else {
                        format!("correct answer {:?} matches no option", q.correct_answer)
                    };
                    warnings.push(ValidationWarning::question(&q.id, message));
                }
            }
            QuestionType::ShortAnswer if has_options => {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    "short-answer question has options that will be ignored",
                ));
            }
            QuestionType::ShortAnswer => {}
        }

        if q.correct_answer.trim().is_empty() {
            warnings.push(ValidationWarning::question(
                &q.id,
                "correct answer is empty; only blank answers will be accepted",
            ));
        }
    }

    warnings
}
