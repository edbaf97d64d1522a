//! Submission grading and score aggregation.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assembly::AssembledTest;
use crate::grading::Grader;

/// One learner answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub question_id: String,
    #[serde(default)]
    pub answer: String,
}

impl Submission {
    pub fn new(question_id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }
}

/// A graded answer, ready to be persisted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Result of grading a whole submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    pub test_id: Uuid,
    pub graded_at: DateTime<Utc>,
    /// Number of correct answers.
    pub correct: usize,
    /// Number of questions in the test, answered or not.
    pub total: usize,
    /// Percentage in `[0, 100]`.
    pub score: f64,
    /// Graded answers in submission order.
    pub answers: Vec<AnswerRecord>,
}

impl TestOutcome {
    /// Questions of the test that received no answer.
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.answers.len())
    }

    /// Save the outcome as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize outcome")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write outcome to {}", path.display()))?;
        Ok(())
    }

    /// Load an outcome from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read outcome from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse outcome JSON")
    }
}

/// Percentage of `correct` out of `total`; zero for an empty test.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

/// Grade every answer against the test and aggregate a score.
///
/// Answers are trimmed before grading. Answers for questions that are not in
/// the test are skipped, and only the first answer to a question counts.
pub fn score_submission(
    test: &AssembledTest,
    answers: &[Submission],
    grader: &Grader,
) -> TestOutcome {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(answers.len());

    for submission in answers {
        let Some(question) = test.question(&submission.question_id) else {
            tracing::debug!(
                question_id = %submission.question_id,
                "answer for unknown question, skipping"
            );
            continue;
        };
        if !seen.insert(question.id.as_str()) {
            tracing::debug!(question_id = %question.id, "duplicate answer, skipping");
            continue;
        }

        let user_answer = submission.answer.trim().to_string();
        let is_correct = grader.grade(question, &user_answer);
        records.push(AnswerRecord {
            question_id: question.id.clone(),
            user_answer,
            is_correct,
        });
    }

    let correct = records.iter().filter(|r| r.is_correct).count();
    let total = test.items.len();

    TestOutcome {
        test_id: test.id,
        graded_at: Utc::now(),
        correct,
        total,
        score: percentage(correct, total),
        answers: records,
    }
}

#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    answers: Vec<Submission>,
}

/// Load answers from a `.json` array or a `.toml` file with `[[answers]]`.
pub fn load_answers(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
    } else {
        let parsed: TomlAnswerFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse answers TOML: {}", path.display()))?;
        Ok(parsed.answers)
    }
}

/// Load every graded outcome saved as JSON in `dir`, newest first.
///
/// Other JSON files in the directory (ingest reports, tests) are skipped.
/// A missing directory means no history yet.
pub fn load_outcomes(dir: &Path) -> Result<Vec<TestOutcome>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    anyhow::ensure!(dir.is_dir(), "not a directory: {}", dir.display());

    let mut outcomes = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        match TestOutcome::load_json(&path) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => tracing::debug!("skipping {}: {:#}", path.display(), e),
        }
    }

    outcomes.sort_by(|a, b| b.graded_at.cmp(&a.graded_at));
    Ok(outcomes)
}
