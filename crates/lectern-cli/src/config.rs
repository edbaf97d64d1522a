//! CLI configuration.
//!
//! The core library takes every tunable as an explicit argument; this module
//! is where the binary resolves them from `lectern.toml`, the environment,
//! and built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lectern_core::extract::DEFAULT_MAX_CONCEPTS;
use lectern_core::grading::DEFAULT_THRESHOLD;

/// Top-level lectern configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LecternConfig {
    /// Similarity a short answer needs to count as correct.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Concepts kept per document.
    #[serde(default = "default_max_concepts")]
    pub max_concepts: usize,
    /// Max documents ingested concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Documents larger than this many MiB are not ingested.
    #[serde(default = "default_max_document_mb")]
    pub max_document_mb: u64,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extra words to exclude from concepts, on top of the built-in list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
fn default_max_concepts() -> usize {
    DEFAULT_MAX_CONCEPTS
}
fn default_parallelism() -> usize {
    4
}
fn default_max_document_mb() -> u64 {
    10
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./lectern-results")
}

impl Default for LecternConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_concepts: default_max_concepts(),
            parallelism: default_parallelism(),
            max_document_mb: default_max_document_mb(),
            output_dir: default_output_dir(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl LecternConfig {
    /// Reject values the core library would refuse.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.threshold),
            "threshold must be between 0.0 and 1.0, got {}",
            self.threshold
        );
        anyhow::ensure!(self.parallelism >= 1, "parallelism must be at least 1");
        anyhow::ensure!(
            self.max_document_mb >= 1,
            "max_document_mb must be at least 1"
        );
        Ok(())
    }

    /// The document size limit in bytes.
    pub fn max_document_bytes(&self) -> u64 {
        self.max_document_mb.saturating_mul(1024 * 1024)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `lectern.toml` in the current directory
/// 2. `~/.config/lectern/config.toml`
///
/// Environment variable overrides: `LECTERN_THRESHOLD`, `LECTERN_MAX_CONCEPTS`.
pub fn load_config_from(path: Option<&Path>) -> Result<LecternConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lectern.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LecternConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LecternConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(
    config: &mut LecternConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(value) = lookup("LECTERN_THRESHOLD") {
        config.threshold = value
            .trim()
            .parse()
            .with_context(|| format!("invalid LECTERN_THRESHOLD: '{value}'"))?;
    }
    if let Some(value) = lookup("LECTERN_MAX_CONCEPTS") {
        config.max_concepts = value
            .trim()
            .parse()
            .with_context(|| format!("invalid LECTERN_MAX_CONCEPTS: '{value}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lectern"))
}
