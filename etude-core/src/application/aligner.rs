//! Exact start-position alignment of gold and test annotations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{ExtractionResult, OutcomeRecord, Score, SpanKey};
use crate::error::Error;

/// Which positions a false positive row records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FpPositions {
    /// The unmatched test annotation's own start, end and category
    #[default]
    Test,
    /// The start of the last gold key in document order, with empty end and
    /// type. Matches ledgers written by earlier ETUDE releases.
    LastGold,
}

impl FpPositions {
    pub fn as_str(&self) -> &'static str {
        match self {
            FpPositions::Test => "test",
            FpPositions::LastGold => "last-gold",
        }
    }
}

impl fmt::Display for FpPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FpPositions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(FpPositions::Test),
            "last-gold" => Ok(FpPositions::LastGold),
            other => Err(Error::configuration(format!(
                "invalid FP position source '{other}' (choose from test, last-gold)"
            ))),
        }
    }
}

/// Classify every start key of one document pair.
///
/// Gold keys come first in document order, each TP when the test side has
/// the same key and FN otherwise. Test keys missing from gold follow as FP,
/// also in document order.
/// True negatives are never produced.
pub fn align(
    file: &str,
    gold: &ExtractionResult,
    test: &ExtractionResult,
    fp_positions: FpPositions,
) -> Vec<OutcomeRecord> {
    let mut outcomes = Vec::with_capacity(gold.len() + test.len());
    let mut last_gold: Option<&SpanKey> = None;

    for (start, records) in gold.iter() {
        let score = if test.contains_key(start) {
            Score::TruePositive
        } else {
            Score::FalseNegative
        };
        let first = &records[0];
        outcomes.push(OutcomeRecord {
            file: file.to_string(),
            start: start.clone(),
            end: first.end.clone(),
            kind: first.category.clone(),
            score,
        });
        last_gold = Some(start);
    }

    for (start, records) in test.iter() {
        if gold.contains_key(start) {
            continue;
        }
        let outcome = match fp_positions {
            FpPositions::Test => OutcomeRecord {
                file: file.to_string(),
                start: start.clone(),
                end: records[0].end.clone(),
                kind: records[0].category.clone(),
                score: Score::FalsePositive,
            },
            FpPositions::LastGold => OutcomeRecord {
                file: file.to_string(),
                start: last_gold.cloned().flatten(),
                end: None,
                kind: String::new(),
                score: Score::FalsePositive,
            },
        };
        outcomes.push(outcome);
    }

    log::debug!(
        "{file}: {} gold key(s), {} test key(s), {} outcome(s)",
        gold.len(),
        test.len(),
        outcomes.len()
    );

    outcomes
}
