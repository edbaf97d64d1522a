//! Randomized test assembly from a question bank.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::{Question, QuestionBank, QuestionType};

/// Number of questions in a test when none is requested.
pub const DEFAULT_TEST_SIZE: usize = 5;

/// What kind of test to assemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Upper bound on the number of questions.
    pub num_questions: usize,
    /// Only pick questions of exactly this difficulty.
    #[serde(default)]
    pub difficulty: Option<u8>,
}

impl Default for TestSpec {
    fn default() -> Self {
        Self {
            num_questions: DEFAULT_TEST_SIZE,
            difficulty: None,
        }
    }
}

/// A test drawn from a bank, including the answers needed to grade it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledTest {
    /// Unique test identifier.
    pub id: Uuid,
    /// Bank the questions were drawn from.
    pub bank_id: String,
    /// Human-readable bank name.
    #[serde(default)]
    pub bank_name: String,
    /// When the test was assembled.
    pub created_at: DateTime<Utc>,
    /// The selected questions, in presentation order.
    pub items: Vec<Question>,
}

/// A question as shown to the learner: no correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestItemView {
    pub question_id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    pub difficulty: u8,
}

impl AssembledTest {
    /// Items without their answers.
    pub fn item_views(&self) -> Vec<TestItemView> {
        self.items
            .iter()
            .map(|q| TestItemView {
                question_id: q.id.clone(),
                question_type: q.question_type,
                prompt: q.prompt.clone(),
                options: q.options.clone(),
                difficulty: q.difficulty,
            })
            .collect()
    }

    /// Look up an item by question id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.items.iter().find(|q| q.id == id)
    }

    /// Save the test as JSON to a file.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize test")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write test to {}", path.display()))?;
        Ok(())
    }

    /// Load a test from a JSON file.
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read test from {}", path.display()))?;
        let test: AssembledTest =
            serde_json::from_str(&content).context("failed to parse test JSON")?;
        Ok(test)
    }
}

/// Randomly draw up to `spec.num_questions` distinct questions from `bank`.
///
/// Fails when `num_questions` is zero or nothing matches the difficulty filter.
pub fn assemble<R>(
    bank: &QuestionBank,
    spec: &TestSpec,
    rng: &mut R,
) -> Result<AssembledTest, CoreError>
where
    R: Rng + ?Sized,
{
    if spec.num_questions == 0 {
        return Err(CoreError::InvalidQuestionCount);
    }

    let mut candidates: Vec<&Question> = bank
        .questions
        .iter()
        .filter(|q| spec.difficulty.map_or(true, |d| q.difficulty == d))
        .collect();

    if candidates.is_empty() {
        return Err(CoreError::NoQuestions {
            difficulty: spec.difficulty,
        });
    }

    let take = spec.num_questions.min(candidates.len());
    let (chosen, _) = candidates.partial_shuffle(rng, take);
    let items: Vec<Question> = chosen.iter().map(|q| (*q).clone()).collect();

    tracing::debug!(
        bank = %bank.id,
        requested = spec.num_questions,
        selected = items.len(),
        "assembled test"
    );

    Ok(AssembledTest {
        id: Uuid::new_v4(),
        bank_id: bank.id.clone(),
        bank_name: bank.name.clone(),
        created_at: Utc::now(),
        items,
    })
}
