//! Concurrent document ingestion.
//!
//! Loads documents through a [`DocumentLoader`], then runs concept extraction,
//! summarization, and placeholder question generation on each one. Documents
//! are processed concurrently up to a parallelism bound; a failing document
//! is recorded as such and never aborts the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::extract::{summarize, ConceptExtractor, DEFAULT_MAX_CONCEPTS};
use crate::model::{Concept, Question};
use crate::questions::placeholder_questions;
use crate::traits::DocumentLoader;

/// Configuration for the ingest engine.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Maximum documents processed at once.
    pub parallelism: usize,
    /// Concepts kept per document.
    pub max_concepts: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_concepts: DEFAULT_MAX_CONCEPTS,
        }
    }
}

/// Lifecycle of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum IngestStatus {
    Pending,
    Parsing,
    Parsed,
    Error(String),
}

impl IngestStatus {
    pub fn is_parsed(&self) -> bool {
        matches!(self, IngestStatus::Parsed)
    }
}

/// Everything derived from one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Where the document was read from.
    pub source: PathBuf,
    /// Final status (`parsed` or `error`).
    pub status: IngestStatus,
    /// Plain-text summary; `None` when the document could not be read.
    pub summary: Option<String>,
    /// Ranked concepts.
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Generated placeholder questions.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl DocumentAnalysis {
    fn failed(source: PathBuf, message: String) -> Self {
        Self {
            source,
            status: IngestStatus::Error(message),
            summary: None,
            concepts: Vec::new(),
            questions: Vec::new(),
        }
    }
}

/// Result of one ingestion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// One entry per input path, in input order.
    pub documents: Vec<DocumentAnalysis>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl IngestReport {
    pub fn parsed_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.status.is_parsed())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.documents.len() - self.parsed_count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_status(&self, source: &Path, status: &IngestStatus);
    fn on_document_complete(&self, analysis: &DocumentAnalysis);
    fn on_batch_complete(&self, total: usize, parsed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_status(&self, _: &Path, _: &IngestStatus) {}
    fn on_document_complete(&self, _: &DocumentAnalysis) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Runs documents through loading and extraction.
pub struct IngestEngine {
    loader: Arc<dyn DocumentLoader>,
    extractor: Arc<ConceptExtractor>,
    config: IngestConfig,
}

impl IngestEngine {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        extractor: Arc<ConceptExtractor>,
        config: IngestConfig,
    ) -> Self {
        Self {
            loader,
            extractor,
            config,
        }
    }

    /// Ingest every path. The returned report lists documents in input order.
    pub async fn run(&self, paths: &[PathBuf], progress: &dyn ProgressReporter) -> IngestReport {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));
        let max_concepts = self.config.max_concepts;

        for path in paths {
            progress.on_status(path, &IngestStatus::Pending);
        }

        let mut futures = FuturesUnordered::new();
        for (index, path) in paths.iter().enumerate() {
            let loader = Arc::clone(&self.loader);
            let extractor = Arc::clone(&self.extractor);
            let semaphore = Arc::clone(&semaphore);
            let path = path.clone();

            futures.push(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (
                        index,
                        DocumentAnalysis::failed(path, "semaphore closed".into()),
                    );
                };
                progress.on_status(&path, &IngestStatus::Parsing);

                let text = match loader.load(&path).await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!("failed to load {}: {e:#}", path.display());
                        return (index, DocumentAnalysis::failed(path, format!("{e:#}")));
                    }
                };

                let analyzed = tokio::task::spawn_blocking(move || {
                    let concepts = extractor.extract(&text, max_concepts);
                    let summary = summarize(&text);
                    (concepts, summary)
                })
                .await;

                match analyzed {
                    Ok((concepts, summary)) => {
                        let questions = placeholder_questions(&concepts);
                        (
                            index,
                            DocumentAnalysis {
                                source: path,
                                status: IngestStatus::Parsed,
                                summary: Some(summary),
                                concepts,
                                questions,
                            },
                        )
                    }
                    Err(e) => {
                        tracing::error!("extraction task failed for {}: {e}", path.display());
                        (index, DocumentAnalysis::failed(path, e.to_string()))
                    }
                }
            });
        }

        let mut documents = Vec::with_capacity(paths.len());
        while let Some((index, analysis)) = futures.next().await {
            progress.on_status(&analysis.source, &analysis.status);
            progress.on_document_complete(&analysis);
            documents.push((index, analysis));
        }
        documents.sort_by_key(|(index, _)| *index);
        let documents: Vec<DocumentAnalysis> = documents.into_iter().map(|(_, d)| d).collect();

        let elapsed = start.elapsed();
        let parsed = documents.iter().filter(|d| d.status.is_parsed()).count();
        progress.on_batch_complete(documents.len(), parsed, documents.len() - parsed, elapsed);
        tracing::info!(
            total = documents.len(),
            parsed,
            "ingestion finished in {}ms",
            elapsed.as_millis()
        );

        IngestReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            documents,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Collect the files under `path` that `loader` can read (recursively for
/// directories, sorted). A single file is returned as-is.
pub fn collect_documents(path: &Path, loader: &dyn DocumentLoader) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        anyhow::ensure!(path.exists(), "document not found: {}", path.display());
        return Ok(vec![path.to_path_buf()]);
    }

    let mut found = Vec::new();
    let mut entries = std::fs::read_dir(path)
        .with_context(|| format!("failed to read directory: {}", path.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let entry_path = entry.path();
        if entry_path.is_dir() {
            found.extend(collect_documents(&entry_path, loader)?);
        } else if loader.supports(&entry_path) {
            found.push(entry_path);
        } else {
            tracing::debug!("skipping unsupported file {}", entry_path.display());
        }
    }
    Ok(found)
}
