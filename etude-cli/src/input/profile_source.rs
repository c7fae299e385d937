//! Schema profile source management for CLI

use anyhow::{Context, Result};
use etude_core::{SchemaProfile, ScoreKey};
use std::path::PathBuf;

use crate::error::CliError;

/// Where a schema profile comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// Profile embedded in etude-core, by name
    BuiltIn(String),
    /// External TOML profile file
    External(PathBuf),
}

impl ProfileSource {
    /// A file path wins over a built-in name.
    pub fn select(name: String, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => ProfileSource::External(path),
            None => ProfileSource::BuiltIn(name),
        }
    }

    /// Get the display name for the profile source
    pub fn display_name(&self) -> String {
        match self {
            ProfileSource::BuiltIn(name) => format!("Built-in: {name}"),
            ProfileSource::External(path) => format!("External: {}", path.display()),
        }
    }

    /// Resolve into a compiled profile
    pub fn load(&self, score_key: ScoreKey) -> Result<SchemaProfile> {
        match self {
            ProfileSource::BuiltIn(name) => SchemaProfile::builtin(name, score_key)
                .with_context(|| format!("Failed to load profile {}", self.display_name())),
            ProfileSource::External(path) => {
                if !path.is_file() {
                    return Err(CliError::FileNotFound(path.display().to_string()).into());
                }
                SchemaProfile::from_file(path, score_key)
                    .with_context(|| format!("Failed to load profile {}", self.display_name()))
            }
        }
    }
}
