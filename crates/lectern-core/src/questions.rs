//! Placeholder question generation for freshly extracted concepts.
//!
//! Real question authoring happens in question banks; ingestion only attaches
//! a fixed sample question so every parsed document has something to test.

use uuid::Uuid;

use crate::model::{Concept, Question};

/// Difficulty of generated placeholder questions.
pub const PLACEHOLDER_DIFFICULTY: u8 = 1;

/// The sample multiple-choice question attached to `concept`.
pub fn placeholder_question(concept: &Concept) -> Question {
    Question::multiple_choice(
        Uuid::new_v4().to_string(),
        "What is 2 + 2?",
        "4",
        [("A", "3"), ("B", "4"), ("C", "5"), ("D", "22")],
    )
    .with_concept(concept.keyword.clone())
    .with_difficulty(PLACEHOLDER_DIFFICULTY)
}

/// Placeholder questions for a document: one, attached to the top concept.
pub fn placeholder_questions(concepts: &[Concept]) -> Vec<Question> {
    concepts.first().map(placeholder_question).into_iter().collect()
}
