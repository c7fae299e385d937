//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use etude_core::{list_available_profiles, Metric, SchemaProfile, ScoreKey};

pub mod score;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a test corpus against a gold reference corpus
    Score(score::ScoreArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a schema profile file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in schema profiles
    Profiles,

    /// List metrics accepted by --metrics
    Metrics,
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Score(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

impl ListCommands {
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Profiles => {
                println!("Built-in schema profiles:");
                for name in list_available_profiles()? {
                    let profile = SchemaProfile::builtin(name, ScoreKey::default())?;
                    println!(
                        "  {:<24} default {}, {} pattern(s)",
                        name,
                        profile.default_score(),
                        profile.patterns().len()
                    );
                }
            }
            ListCommands::Metrics => {
                println!("Available metrics:");
                for metric in Metric::ALL {
                    let marker = if Metric::DEFAULT.contains(&metric) {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("  {metric}{marker}");
                }
            }
        }
        Ok(())
    }
}
