//! Summary normalization: counts in, ordered report rows out

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::metrics::{self, Metric};
use crate::domain::{Score, ScoreCard, ScoreCounts};
use crate::error::{Error, Result};

/// Row label of the corpus-wide summary
pub const AGGREGATE_ROW: &str = "aggregate";

/// Base counts and derived metrics for one reporting scope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    values: BTreeMap<Metric, f64>,
}

impl ScoreSummary {
    /// Start from raw counts. TP, FP, TN and FN are always present afterwards.
    pub fn from_counts(counts: &ScoreCounts) -> Self {
        let values = Score::ALL
            .iter()
            .map(|score| {
                let count = counts.get(score).copied().unwrap_or(0) as f64;
                (base_metric(*score), count)
            })
            .collect();
        Self { values }
    }

    /// Compute the derived metrics `requested` needs.
    ///
    /// Precision and Recall are filled in whenever F1 is requested, even if
    /// they are not themselves requested.
    pub fn with_metrics(mut self, requested: &[Metric]) -> Self {
        let wants = |metric: Metric| requested.contains(&metric);
        let tp = self.base(Metric::TP);
        let fp = self.base(Metric::FP);
        let tn = self.base(Metric::TN);
        let fn_ = self.base(Metric::FN);

        if wants(Metric::Recall) || wants(Metric::F1) {
            self.values.insert(Metric::Recall, metrics::recall(tp, fn_));
        }
        if wants(Metric::Sensitivity) {
            self.values.insert(Metric::Sensitivity, metrics::recall(tp, fn_));
        }
        if wants(Metric::Precision) || wants(Metric::F1) {
            self.values.insert(Metric::Precision, metrics::precision(tp, fp));
        }
        if wants(Metric::Specificity) {
            self.values
                .insert(Metric::Specificity, metrics::specificity(tn, fn_));
        }
        if wants(Metric::Accuracy) {
            self.values
                .insert(Metric::Accuracy, metrics::accuracy(tp, fp, tn, fn_));
        }
        if wants(Metric::F1) {
            let p = self.base(Metric::Precision);
            let r = self.base(Metric::Recall);
            self.values.insert(Metric::F1, metrics::f_score(p, r, 1.0));
        }
        self
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    fn base(&self, metric: Metric) -> f64 {
        self.values.get(&metric).copied().unwrap_or(0.0)
    }
}

fn base_metric(score: Score) -> Metric {
    match score {
        Score::TruePositive => Metric::TP,
        Score::FalsePositive => Metric::FP,
        Score::TrueNegative => Metric::TN,
        Score::FalseNegative => Metric::FN,
    }
}

/// One reporting row: a label followed by values in requested order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub values: Vec<f64>,
}

/// Normalize `counts` and pick the requested metrics in order.
pub fn normalize(counts: &ScoreCounts, row_label: &str, requested: &[Metric]) -> Result<SummaryRow> {
    let summary = ScoreSummary::from_counts(counts).with_metrics(requested);
    let values = requested
        .iter()
        .map(|metric| {
            summary
                .get(*metric)
                .ok_or_else(|| Error::configuration(format!("metric {metric} was not computed")))
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(SummaryRow {
        label: row_label.to_string(),
        values,
    })
}

/// Aggregate row plus, optionally, one row per scored gold document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub metrics: Vec<Metric>,
    pub rows: Vec<SummaryRow>,
}

impl Report {
    pub fn from_score_card(card: &ScoreCard, metrics: &[Metric], per_file: bool) -> Result<Self> {
        let mut rows = vec![normalize(&card.counts(), AGGREGATE_ROW, metrics)?];
        if per_file {
            for file in card.files() {
                rows.push(normalize(&card.counts_for(file), file, metrics)?);
            }
        }
        Ok(Self {
            metrics: metrics.to_vec(),
            rows,
        })
    }

    pub fn aggregate(&self) -> Option<&SummaryRow> {
        self.rows.first()
    }
}
