//! Answer grading for multiple-choice and short-answer questions.
//!
//! There is exactly one grading policy per question type:
//!
//! - **Multiple choice**: a submitted option label is replaced by the option
//!   text, then both sides are normalized and compared for equality.
//! - **Short answer**: normalized equality first, then a similarity ratio
//!   against a threshold (default 0.85).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Question, QuestionType};
use crate::similarity::similarity_ratio;

/// Default similarity required for a short answer to count as correct.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}',
];

/// Canonicalize an answer for comparison.
///
/// Lowercases, collapses whitespace runs to one space, trims, then strips
/// surrounding punctuation. Interior punctuation is kept.
///
/// Whitespace uncovered by stripping (`". x"`) is stripped too, so the
/// result never starts or ends with a space and `normalize` is idempotent.
pub fn normalize(s: &str) -> String {
    let collapsed = s
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}

/// Outcome of grading one answer, with the compared forms for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    /// The submission after option substitution and normalization.
    pub submitted: String,
    /// The normalized correct answer.
    pub expected: String,
    /// Similarity ratio, present only when the fuzzy fallback ran.
    pub similarity: Option<f64>,
}

/// Grades answers against questions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grader {
    threshold: f64,
}

impl Default for Grader {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Grader {
    /// A grader with a custom short-answer threshold in `[0, 1]`.
    pub fn with_threshold(threshold: f64) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CoreError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether `submitted` is a correct answer to `question`.
    pub fn grade(&self, question: &Question, submitted: &str) -> bool {
        self.grade_verbose(question, submitted).correct
    }

    /// Grade and keep the normalized forms and similarity.
    pub fn grade_verbose(&self, question: &Question, submitted: &str) -> Verdict {
        match question.question_type {
            QuestionType::MultipleChoice => grade_multiple_choice(question, submitted),
            QuestionType::ShortAnswer => {
                grade_short_answer(submitted, &question.correct_answer, self.threshold)
            }
        }
    }
}

fn grade_multiple_choice(question: &Question, submitted: &str) -> Verdict {
    let chosen = question.option_text(submitted).unwrap_or(submitted);
    let submitted = normalize(chosen);
    let expected = normalize(&question.correct_answer);
    Verdict {
        correct: submitted == expected,
        submitted,
        expected,
        similarity: None,
    }
}

fn grade_short_answer(submitted: &str, correct: &str, threshold: f64) -> Verdict {
    let submitted = normalize(submitted);
    let expected = normalize(correct);

    if submitted == expected {
        return Verdict {
            correct: true,
            submitted,
            expected,
            similarity: None,
        };
    }

    let ratio = similarity_ratio(&submitted, &expected);
    Verdict {
        correct: ratio >= threshold,
        submitted,
        expected,
        similarity: Some(ratio),
    }
}

/// Grade with the default threshold.
pub fn grade(question: &Question, submitted: &str) -> bool {
    Grader::default().grade(question, submitted)
}
