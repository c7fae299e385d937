//! Validate command implementation

use anyhow::Result;
use clap::Args;
use etude_core::{SchemaProfile, ScoreKey};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to schema profile file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub profile: PathBuf,

    /// Pattern name used as the annotation type [default: long_name]
    #[arg(long, value_name = "KEY", value_parser = super::score::parse_score_key)]
    pub score_key: Option<ScoreKey>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating schema profile: {}", self.profile.display());

        let score_key = self.score_key.unwrap_or_default();

        match SchemaProfile::from_file(&self.profile, score_key) {
            Ok(profile) => {
                println!("✓ Profile is valid!");
                println!("  Name: {}", profile.name());
                println!("  Default score: {}", profile.default_score());
                println!("  Patterns: {}", profile.patterns().len());
                for pattern in profile.patterns() {
                    println!("    - {}", pattern.category);
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Profile is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
