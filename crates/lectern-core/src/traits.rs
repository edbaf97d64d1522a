//! Core trait definitions for document sources.
//!
//! A loader turns a document on disk into plain text. Decoding PDF or Word
//! files is left to loaders outside this crate.

use std::path::Path;

use async_trait::async_trait;

/// Trait for backends that turn a document into plain text.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Human-readable loader name (e.g. "plain-text").
    fn name(&self) -> &str;

    /// Whether this loader can read the given file.
    fn supports(&self, path: &Path) -> bool;

    /// Read the document and return its text.
    ///
    /// Undecodable bytes should be replaced, not reported as errors.
    async fn load(&self, path: &Path) -> anyhow::Result<String>;
}
