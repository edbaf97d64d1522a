//! Plain-text document loader.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;

use crate::traits::DocumentLoader;

/// Extensions read as plain text. Files without an extension are accepted too.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Largest document read by default: 10 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Reads UTF-8 text files, replacing invalid byte sequences.
///
/// Files larger than `max_bytes` are refused before any content is read.
#[derive(Debug, Clone, Copy)]
pub struct PlainTextLoader {
    max_bytes: u64,
}

impl Default for PlainTextLoader {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl PlainTextLoader {
    /// A loader that refuses documents over `max_bytes`.
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

#[async_trait]
impl DocumentLoader for PlainTextLoader {
    fn name(&self) -> &str {
        "plain-text"
    }

    fn supports(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            None => true,
            Some(ext) => TEXT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known)),
        }
    }

    async fn load(&self, path: &Path) -> anyhow::Result<String> {
        if !self.supports(path) {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            anyhow::bail!("unsupported document type: .{ext}");
        }
        let size = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("failed to read document: {}", path.display()))?
            .len();
        if size > self.max_bytes {
            anyhow::bail!(
                "document too large: {size} bytes (limit {} bytes)",
                self.max_bytes
            );
        }
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read document: {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
