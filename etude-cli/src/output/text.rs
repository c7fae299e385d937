//! Delimited text output formatter

use super::{format_value, OutputFormatter};
use anyhow::Result;
use etude_core::Report;
use std::io::Write;

/// Marker printed before the metric names
pub const HEADER_MARKER: &str = "#########";

/// Text formatter - a marker header, then one delimited row per scope
pub struct TextFormatter<W: Write> {
    writer: W,
    delimiter: String,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, delimiter: &str) -> Self {
        Self {
            writer,
            delimiter: delimiter.to_string(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_report(&mut self, report: &Report) -> Result<()> {
        let names: Vec<&str> = report.metrics.iter().map(|m| m.as_str()).collect();
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{HEADER_MARKER}{}{}",
            self.delimiter,
            names.join(self.delimiter.as_str())
        )?;

        for row in &report.rows {
            let mut fields = vec![row.label.clone()];
            fields.extend(row.values.iter().copied().map(format_value));
            writeln!(self.writer, "{}", fields.join(self.delimiter.as_str()))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etude_core::{Metric, SummaryRow};

    fn report() -> Report {
        Report {
            metrics: vec![Metric::TP, Metric::FP, Metric::Precision],
            rows: vec![
                SummaryRow {
                    label: "aggregate".to_string(),
                    values: vec![3.0, 1.0, 0.75],
                },
                SummaryRow {
                    label: "0001.xml".to_string(),
                    values: vec![3.0, 1.0, 0.75],
                },
            ],
        }
    }

    #[test]
    fn test_tab_delimited_output() {
        let mut formatter = TextFormatter::new(Vec::new(), "\t");
        formatter.format_report(&report()).unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(formatter.writer).unwrap();
        assert_eq!(
            output,
            "\n#########\tTP\tFP\tPrecision\naggregate\t3.0\t1.0\t0.75\n0001.xml\t3.0\t1.0\t0.75\n"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let mut formatter = TextFormatter::new(Vec::new(), ",");
        formatter.format_report(&report()).unwrap();

        let output = String::from_utf8(formatter.writer).unwrap();
        assert!(output.contains("#########,TP,FP,Precision\n"));
        assert!(output.contains("aggregate,3.0,1.0,0.75\n"));
    }
}
