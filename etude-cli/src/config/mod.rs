//! Configuration module
//!
//! An optional TOML file supplies defaults for `etude score`. Command-line
//! flags always take precedence over values read here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Corpus pairing configuration
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Schema profile configuration
    #[serde(default)]
    pub profiles: ProfilesConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).map_err(|e| {
            anyhow::Error::from(CliError::ConfigError(format!(
                "{}: {}",
                path.display(),
                e.message()
            )))
        })
    }
}

/// Report-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Ordered metric names
    pub metrics: Option<Vec<String>>,

    /// Field delimiter for text output
    pub delimiter: Option<String>,

    /// Output format name
    pub format: Option<String>,

    /// Print one row per gold document
    #[serde(default)]
    pub per_file: bool,
}

/// Corpus pairing configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    pub file_prefix: Option<String>,
    pub file_suffix: Option<String>,
    pub test_name_pattern: Option<String>,
    pub test_name_replacement: Option<String>,
}

/// Schema profile configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    /// Built-in profile for the gold corpus
    pub gold: Option<String>,

    /// Built-in profile for the test corpus
    pub test: Option<String>,

    /// Profile file for the gold corpus
    pub gold_file: Option<PathBuf>,

    /// Profile file for the test corpus
    pub test_file: Option<PathBuf>,

    /// `long_name`, `short_name` or `parent`
    pub score_key: Option<String>,

    /// `test` or `last-gold`
    pub fp_positions: Option<String>,
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Score documents in parallel
    #[serde(default)]
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    #[serde(default)]
    pub worker_threads: usize,
}
