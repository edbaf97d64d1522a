//! lectern-core — Concept extraction, answer grading, and test assembly.
//!
//! This crate holds the data model and the pure algorithms the rest of
//! lectern builds on: keyword-frequency concept extraction, summaries, answer
//! normalization and grading, question banks, randomized test assembly,
//! submission scoring, and concurrent ingestion of plain-text documents.

pub mod assembly;
pub mod error;
pub mod extract;
pub mod grading;
pub mod ingest;
pub mod loader;
pub mod model;
pub mod parser;
pub mod questions;
pub mod similarity;
pub mod stopwords;
pub mod submission;
pub mod traits;

pub use error::CoreError;
pub use extract::{extract_concepts, summarize, ConceptExtractor};
pub use grading::{grade, normalize, Grader, Verdict};
pub use model::{Concept, Question, QuestionBank, QuestionType};
pub use stopwords::Stopwords;
