//! ETUDE command-line entry point

use anyhow::Result;
use clap::Parser;
use etude_cli::commands::Commands;

/// ETUDE (Evaluation Tool for Unstructured Data and Extractions) scores
/// unstructured data tagging and extraction against a gold reference set.
#[derive(Debug, Parser)]
#[command(name = "etude", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
