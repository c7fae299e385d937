//! Domain types: annotations, outcomes and metric math

pub mod annotation;
pub mod metrics;
pub mod outcome;

pub use annotation::{AnnotationRecord, ExtractionResult, RecordList, Score, SpanKey};
pub use metrics::Metric;
pub use outcome::{OutcomeRecord, ScoreCard, ScoreCounts};
