//! Annotation alignment and scoring for ETUDE corpus evaluation
//!
//! Compares a gold (reference) annotation corpus with a test (system output)
//! corpus document by document. Spans are pulled out of XML with schema
//! profiles, aligned by exact start position, labelled TP / FN / FP, and
//! summarized into precision, recall and related metrics.
//!
//! # Architecture
//!
//! - **Domain layer**: annotation records, the outcome ledger and metric math
//! - **Profile layer**: schema profiles and XPath-like selectors
//! - **Application layer**: extraction, alignment, summaries and corpus runs
//!
//! # Example
//!
//! ```rust
//! use etude_core::{align, extract_from_str, normalize, FpPositions, Metric, SchemaProfile, ScoreKey};
//! use etude_core::domain::ScoreCard;
//! use std::path::Path;
//!
//! let gold_profile = SchemaProfile::builtin("i2b2_2016_track-1", ScoreKey::default()).unwrap();
//! let test_profile = SchemaProfile::builtin("CAS XMI", ScoreKey::default()).unwrap();
//!
//! let gold = extract_from_str(
//!     r#"<deIdi2b2><TAGS><DATE start="10" end="20" text="2067-05-03"/></TAGS></deIdi2b2>"#,
//!     Path::new("0001.xml"),
//!     &gold_profile,
//! ).unwrap();
//! let test = extract_from_str(
//!     r#"<CAS><org.apache.uima.tutorial.DateAnnot begin="10" end="20"/></CAS>"#,
//!     Path::new("0001.txt"),
//!     &test_profile,
//! ).unwrap();
//!
//! let card: ScoreCard = align("0001.xml", &gold, &test, FpPositions::default())
//!     .into_iter()
//!     .collect();
//! let row = normalize(&card.counts(), "aggregate", &[Metric::TP, Metric::Precision]).unwrap();
//! assert_eq!(row.values, vec![1.0, 1.0]);
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod profile;

pub use application::{
    align, extract_annotations, extract_from_str, normalize, CorpusScorer, FpPositions, Report,
    ScoreSummary, ScorerConfig, ScorerConfigBuilder, SummaryRow, AGGREGATE_ROW,
};
pub use domain::{
    AnnotationRecord, ExtractionResult, Metric, OutcomeRecord, Score, ScoreCard, ScoreCounts,
    SpanKey,
};
pub use error::{Error, Result};
pub use profile::{
    list_available_profiles, SchemaProfile, ScoreKey, COMPARISON_PROFILE, REFERENCE_PROFILE,
};
