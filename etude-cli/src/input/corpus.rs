//! Gold and test corpus directory resolution

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Absolute gold and test corpus directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDirs {
    pub gold: PathBuf,
    pub test: PathBuf,
}

impl CorpusDirs {
    /// Check both directories exist and make them absolute
    pub fn resolve(gold: &Path, test: &Path) -> Result<Self> {
        Ok(Self {
            gold: resolve_dir(gold)?,
            test: resolve_dir(test)?,
        })
    }
}

fn resolve_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(CliError::DirectoryNotFound(path.display().to_string()).into());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to resolve directory: {}", path.display()))
}
