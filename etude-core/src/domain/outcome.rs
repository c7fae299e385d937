//! Outcome ledger produced by alignment

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::annotation::{Score, SpanKey};

/// Raw number of outcomes per confusion-matrix label
pub type ScoreCounts = BTreeMap<Score, usize>;

/// One row of the scoring ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Gold document the outcome belongs to
    pub file: String,
    pub start: SpanKey,
    pub end: Option<String>,
    /// Annotation category; empty when not tracked
    #[serde(rename = "type")]
    pub kind: String,
    pub score: Score,
}

/// Every outcome of one corpus run, in the order it was produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreCard {
    records: Vec<OutcomeRecord>,
    files: Vec<String>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scored gold document. Called once per document, in order.
    pub(crate) fn add_file(&mut self, file: impl Into<String>) {
        self.files.push(file.into());
    }

    pub(crate) fn extend<I: IntoIterator<Item = OutcomeRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Gold documents that were scored, including those with no outcomes
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Outcome counts over the whole run
    pub fn counts(&self) -> ScoreCounts {
        count_scores(self.records.iter())
    }

    /// Outcome counts restricted to one gold document
    pub fn counts_for(&self, file: &str) -> ScoreCounts {
        count_scores(self.records.iter().filter(|record| record.file == file))
    }
}

impl FromIterator<OutcomeRecord> for ScoreCard {
    fn from_iter<I: IntoIterator<Item = OutcomeRecord>>(iter: I) -> Self {
        let records: Vec<OutcomeRecord> = iter.into_iter().collect();
        let mut files: Vec<String> = records.iter().map(|r| r.file.clone()).collect();
        files.sort();
        files.dedup();
        Self { records, files }
    }
}

fn count_scores<'a>(records: impl Iterator<Item = &'a OutcomeRecord>) -> ScoreCounts {
    let mut counts = ScoreCounts::new();
    for record in records {
        *counts.entry(record.score).or_insert(0) += 1;
    }
    counts
}
