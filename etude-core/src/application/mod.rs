//! Application layer: extraction, alignment, summaries and corpus runs

pub mod aligner;
pub mod extractor;
pub mod scorer;
pub mod summary;

pub use aligner::{align, FpPositions};
pub use extractor::{extract_annotations, extract_from_str};
pub use scorer::{CorpusScorer, ScorerConfig, ScorerConfigBuilder};
pub use summary::{normalize, Report, ScoreSummary, SummaryRow, AGGREGATE_ROW};
