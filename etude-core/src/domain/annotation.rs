//! Annotation records and per-document extraction results

use serde::{Deserialize, Serialize};
use indexmap::map::{self, IndexMap};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Confusion-matrix label attached to records and outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Score {
    #[serde(rename = "TP")]
    TruePositive,
    #[serde(rename = "FP")]
    FalsePositive,
    #[serde(rename = "TN")]
    TrueNegative,
    #[serde(rename = "FN")]
    FalseNegative,
}

impl Score {
    /// All four labels in reporting order
    pub const ALL: [Score; 4] = [
        Score::TruePositive,
        Score::FalsePositive,
        Score::TrueNegative,
        Score::FalseNegative,
    ];

    /// Short label as printed in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Score::TruePositive => "TP",
            Score::FalsePositive => "FP",
            Score::TrueNegative => "TN",
            Score::FalseNegative => "FN",
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Score {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TP" => Ok(Score::TruePositive),
            "FP" => Ok(Score::FalsePositive),
            "TN" => Ok(Score::TrueNegative),
            "FN" => Ok(Score::FalseNegative),
            other => Err(Error::configuration(format!(
                "unknown score label '{other}', expected one of TP, FP, TN, FN"
            ))),
        }
    }
}

/// Position key used for alignment. Compared as raw text, never coerced.
pub type SpanKey = Option<String>;

/// One annotated span pulled out of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub start: SpanKey,
    pub end: Option<String>,
    pub text: Option<String>,
    pub category: String,
    /// Label used when the start key has no counterpart on the other side
    pub default_score: Score,
}

/// Records sharing one start key, in document order. Never empty.
pub type RecordList = SmallVec<[AnnotationRecord; 1]>;

/// Annotations of one document grouped by start key.
///
/// Keys keep the order in which they were first seen during extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    spans: IndexMap<SpanKey, RecordList>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under its start key. Colliding keys keep every record.
    pub fn insert(&mut self, record: AnnotationRecord) {
        self.spans
            .entry(record.start.clone())
            .or_default()
            .push(record);
    }

    pub fn contains_key(&self, key: &SpanKey) -> bool {
        self.spans.contains_key(key)
    }

    pub fn get(&self, key: &SpanKey) -> Option<&[AnnotationRecord]> {
        self.spans.get(key).map(|records| records.as_slice())
    }

    /// Start keys in order of first appearance
    pub fn keys(&self) -> map::Keys<'_, SpanKey, RecordList> {
        self.spans.keys()
    }

    pub fn iter(&self) -> map::Iter<'_, SpanKey, RecordList> {
        self.spans.iter()
    }

    /// Number of distinct start keys
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of records across all keys
    pub fn record_count(&self) -> usize {
        self.spans.values().map(|records| records.len()).sum()
    }
}

impl FromIterator<AnnotationRecord> for ExtractionResult {
    fn from_iter<I: IntoIterator<Item = AnnotationRecord>>(iter: I) -> Self {
        let mut result = ExtractionResult::new();
        for record in iter {
            result.insert(record);
        }
        result
    }
}
