//! Core error types.
//!
//! Text operations (extraction, summaries, grading) are total and never fail.
//! These errors cover contract violations at the boundaries: malformed question
//! types, out-of-range tunables, and test assembly requests that cannot be met.

use thiserror::Error;

/// Errors raised by `lectern-core`.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A question type string that is neither multiple-choice nor short-answer.
    #[error("unknown question type: {0:?}")]
    UnknownQuestionType(String),

    /// Similarity threshold outside `[0, 1]` (or NaN).
    #[error("similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// A concept was constructed with an empty keyword.
    #[error("concept keyword must not be empty")]
    EmptyKeyword,

    /// Concept importance outside 1–5.
    #[error("concept importance must be between 1 and 5, got {0}")]
    InvalidImportance(u8),

    /// A test was requested with zero questions.
    #[error("a test needs at least one question")]
    InvalidQuestionCount,

    /// No question in the bank matched the assembly request.
    #[error("no questions found{}", difficulty.map(|d| format!(" with difficulty {d}")).unwrap_or_default())]
    NoQuestions { difficulty: Option<u8> },
}

impl CoreError {
    /// Returns `true` if the error reflects bad caller input rather than
    /// missing data.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, CoreError::NoQuestions { .. })
    }
}
