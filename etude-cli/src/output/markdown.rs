//! Markdown output formatter

use super::{format_value, OutputFormatter};
use anyhow::Result;
use etude_core::Report;
use std::io::Write;

/// Markdown formatter - outputs the report as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    row_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            row_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_report(&mut self, report: &Report) -> Result<()> {
        let mut header = String::from("| Scope |");
        let mut rule = String::from("|---|");
        for metric in &report.metrics {
            header.push_str(&format!(" {metric} |"));
            rule.push_str("---:|");
        }
        writeln!(self.writer, "{header}")?;
        writeln!(self.writer, "{rule}")?;

        for row in &report.rows {
            let values: Vec<String> = row.values.iter().copied().map(format_value).collect();
            writeln!(self.writer, "| {} | {} |", row.label, values.join(" | "))?;
            self.row_count += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "*Rows: {}*", self.row_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
