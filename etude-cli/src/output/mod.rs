//! Output formatting module

use anyhow::Result;
use etude_core::Report;
use std::io::Write;

/// Trait for report formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a complete report
    fn format_report(&mut self, report: &Report) -> Result<()>;

    /// Finalize output (e.g., flush the writer)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Delimited rows preceded by a marker header
    Text,
    /// JSON object with metric names and rows
    Json,
    /// Markdown table
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    delimiter: &str,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, delimiter)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// Render a report value the way earlier ETUDE releases printed floats
pub(crate) fn format_value(value: f64) -> String {
    format!("{value:?}")
}
