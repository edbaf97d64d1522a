//! Core data model types for lectern.
//!
//! Concepts extracted from lecture material, the questions attached to them,
//! and the question banks that group questions on disk.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Importance assigned to every extracted concept.
pub const DEFAULT_IMPORTANCE: u8 = 3;

/// Difficulty for bank questions that do not specify one.
pub const DEFAULT_DIFFICULTY: u8 = 3;

/// A candidate key idea extracted from source material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// The keyword, always a surviving token (lowercase, non-empty).
    pub keyword: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Importance from 1 (minor) to 5 (central).
    #[serde(default = "default_importance")]
    pub importance: u8,
}

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}

impl Concept {
    /// Build a concept, rejecting an empty keyword or out-of-range importance.
    pub fn new(
        keyword: impl Into<String>,
        description: impl Into<String>,
        importance: u8,
    ) -> Result<Self, CoreError> {
        let keyword = keyword.into();
        if keyword.trim().is_empty() {
            return Err(CoreError::EmptyKeyword);
        }
        if !(1..=5).contains(&importance) {
            return Err(CoreError::InvalidImportance(importance));
        }
        Ok(Self {
            keyword,
            description: description.into(),
            importance,
        })
    }

    /// The concept emitted by frequency extraction: `"Key term: <keyword>"`.
    pub(crate) fn key_term(keyword: String) -> Self {
        let description = format!("Key term: {keyword}");
        Self {
            keyword,
            description,
            importance: DEFAULT_IMPORTANCE,
        }
    }
}

/// The two supported question kinds.
///
/// Serialized as `"mcq"` and `"short_answer"`; `"multiple_choice"` is also
/// accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "mcq", alias = "multiple_choice")]
    MultipleChoice,
    #[serde(rename = "short_answer")]
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "mcq"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" | "multiple_choice" | "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "short_answer" | "short-answer" | "short" => Ok(QuestionType::ShortAnswer),
            _ => Err(CoreError::UnknownQuestionType(s.to_string())),
        }
    }
}

/// A quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within its bank.
    pub id: String,
    /// Keyword of the concept this question belongs to.
    #[serde(default)]
    pub concept: String,
    /// Multiple-choice or short-answer.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// The question text shown to the learner.
    pub prompt: String,
    /// The expected answer. A missing answer is the empty string.
    #[serde(default)]
    pub correct_answer: String,
    /// Label → text, e.g. `{"A": "Paris"}`. Only meaningful for multiple choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    /// Difficulty from 1 to 5.
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
}

fn default_difficulty() -> u8 {
    DEFAULT_DIFFICULTY
}

impl Question {
    /// Convenience constructor for a multiple-choice question.
    pub fn multiple_choice<I, L, T>(
        id: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            concept: String::new(),
            question_type: QuestionType::MultipleChoice,
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            options: Some(
                options
                    .into_iter()
                    .map(|(l, t)| (l.into(), t.into()))
                    .collect(),
            ),
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    /// Convenience constructor for a short-answer question.
    pub fn short_answer(
        id: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            concept: String::new(),
            question_type: QuestionType::ShortAnswer,
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            options: None,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    /// Set the owning concept keyword.
    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = concept.into();
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Options in sorted label order. Empty for questions without options.
    pub fn sorted_options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options
            .iter()
            .flat_map(|opts| opts.iter())
            .map(|(label, text)| (label.as_str(), text.as_str()))
    }

    /// Text of the option with exactly this label (case-sensitive).
    pub fn option_text(&self, label: &str) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|opts| opts.get(label))
            .map(String::as_str)
    }
}

/// A named collection of questions, usually loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the material covered.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::MultipleChoice.to_string(), "mcq");
        assert_eq!(QuestionType::ShortAnswer.to_string(), "short_answer");
        assert_eq!(
            "mcq".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            "Multiple_Choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            "short_answer".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
    }

    #[test]
    fn question_type_rejects_enum_repr_strings() {
        assert_eq!(
            "QType.mcq".parse::<QuestionType>(),
            Err(CoreError::UnknownQuestionType("QType.mcq".into()))
        );
        assert!("ox".parse::<QuestionType>().is_err());
        assert!("".parse::<QuestionType>().is_err());
    }

    #[test]
    fn question_type_serde_names() {
        let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "\"mcq\"");
        let parsed: QuestionType = serde_json::from_str("\"multiple_choice\"").unwrap();
        assert_eq!(parsed, QuestionType::MultipleChoice);
        assert!(serde_json::from_str::<QuestionType>("\"QType.mcq\"").is_err());
    }

    #[test]
    fn concept_validation() {
        assert_eq!(Concept::new("", "x", 3), Err(CoreError::EmptyKeyword));
        assert_eq!(
            Concept::new("cell", "x", 6),
            Err(CoreError::InvalidImportance(6))
        );
        let c = Concept::new("cell", "Unit of life", 5).unwrap();
        assert_eq!(c.importance, 5);
    }

    #[test]
    fn key_term_description() {
        let c = Concept::key_term("osmosis".into());
        assert_eq!(c.description, "Key term: osmosis");
        assert_eq!(c.importance, DEFAULT_IMPORTANCE);
    }

    #[test]
    fn options_iterate_in_label_order() {
        let q = Question::multiple_choice(
            "q1",
            "Capital of France?",
            "Paris",
            [("C", "Nice"), ("A", "Paris"), ("B", "Lyon")],
        );
        let labels: Vec<&str> = q.sorted_options().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(q.option_text("B"), Some("Lyon"));
        assert_eq!(q.option_text("b"), None);
    }

    #[test]
    fn question_missing_fields_use_defaults() {
        let q: Question =
            serde_json::from_str(r#"{"id":"q","type":"short_answer","prompt":"Define osmosis"}"#)
                .unwrap();
        assert_eq!(q.correct_answer, "");
        assert_eq!(q.difficulty, DEFAULT_DIFFICULTY);
        assert!(q.options.is_none());
        assert_eq!(q.sorted_options().count(), 0);
    }
}
