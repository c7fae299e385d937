//! Confusion-matrix metrics
//!
//! Every function returns `0.0` when its denominator is zero instead of
//! producing `NaN`.
//!
//! Two formulas intentionally differ from the textbook definitions so that
//! scores stay comparable with earlier ETUDE reports:
//! - [`specificity`] divides by `tn + fn` rather than `tn + fp`.
//! - [`f_score`] is `(1 + β²)·p·r / (p + r)`. At β = 1 this is the usual
//!   F1 (perfect precision and recall give `1.0`), but precision is never
//!   weighted by β² in the denominator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// (tp + tn) / (tp + fp + tn + fn)
pub fn accuracy(tp: f64, fp: f64, tn: f64, fn_: f64) -> f64 {
    let total = tp + fp + tn + fn_;
    if total > 0.0 {
        (tp + tn) / total
    } else {
        0.0
    }
}

/// tp / (tp + fp)
pub fn precision(tp: f64, fp: f64) -> f64 {
    if tp + fp > 0.0 {
        tp / (tp + fp)
    } else {
        0.0
    }
}

/// tp / (tp + fn)
pub fn recall(tp: f64, fn_: f64) -> f64 {
    if tp + fn_ > 0.0 {
        tp / (tp + fn_)
    } else {
        0.0
    }
}

/// tn / (tn + fn)
pub fn specificity(tn: f64, fn_: f64) -> f64 {
    if tn + fn_ > 0.0 {
        tn / (tn + fn_)
    } else {
        0.0
    }
}

/// (1 + β²) · (p · r) / (p + r)
pub fn f_score(p: f64, r: f64, beta: f64) -> f64 {
    if p + r > 0.0 {
        (1.0 + beta * beta) * ((p * r) / (p + r))
    } else {
        0.0
    }
}

/// Reportable metric names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    TP,
    FP,
    TN,
    FN,
    Precision,
    Recall,
    Sensitivity,
    Specificity,
    Accuracy,
    F1,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::TP,
        Metric::FP,
        Metric::TN,
        Metric::FN,
        Metric::Precision,
        Metric::Recall,
        Metric::Sensitivity,
        Metric::Specificity,
        Metric::Accuracy,
        Metric::F1,
    ];

    /// Default report columns
    pub const DEFAULT: [Metric; 4] = [Metric::TP, Metric::FP, Metric::TN, Metric::FN];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::TP => "TP",
            Metric::FP => "FP",
            Metric::TN => "TN",
            Metric::FN => "FN",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::Sensitivity => "Sensitivity",
            Metric::Specificity => "Specificity",
            Metric::Accuracy => "Accuracy",
            Metric::F1 => "F1",
        }
    }

    /// Parse an ordered list of metric names, rejecting the whole list on
    /// the first unknown name.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>, Error> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .find(|metric| metric.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let choices: Vec<&str> = Metric::ALL.iter().map(Metric::as_str).collect();
                Error::configuration(format!(
                    "invalid metric '{s}' (choose from {})",
                    choices.join(", ")
                ))
            })
    }
}
