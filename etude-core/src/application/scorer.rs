//! Corpus scoring: pair gold and test documents, extract, align, accumulate

use glob::{MatchOptions, Pattern};
use regex::Regex;
use std::fs;
use std::path::Path;

use super::aligner::{align, FpPositions};
use super::extractor::extract_annotations;
use crate::domain::{OutcomeRecord, ScoreCard};
use crate::error::{Error, Result};
use crate::profile::SchemaProfile;

/// `*` never matches a leading dot, so hidden files are not gold documents
const GOLD_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Default configuration constants
pub mod defaults {
    /// Gold documents are any file with this suffix
    pub const FILE_SUFFIX: &str = ".xml";

    /// Applied to a gold file name to find its test counterpart
    pub const TEST_NAME_PATTERN: &str = "xml$";

    pub const TEST_NAME_REPLACEMENT: &str = "txt";
}

/// Corpus pairing and alignment settings
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub(crate) file_prefix: String,
    pub(crate) file_suffix: String,
    pub(crate) test_name_pattern: Regex,
    pub(crate) test_name_replacement: String,
    pub(crate) fp_positions: FpPositions,
    pub(crate) parallel: bool,
}

impl ScorerConfig {
    pub fn builder() -> ScorerConfigBuilder {
        ScorerConfigBuilder::default()
    }

    /// Test document name for a gold document name
    pub fn test_name_for(&self, gold_name: &str) -> String {
        self.test_name_pattern
            .replace_all(gold_name, self.test_name_replacement.as_str())
            .into_owned()
    }

    pub fn fp_positions(&self) -> FpPositions {
        self.fp_positions
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    fn gold_filter(&self) -> Result<Pattern> {
        let raw = format!(
            "{}*{}",
            Pattern::escape(&self.file_prefix),
            Pattern::escape(&self.file_suffix)
        );
        Pattern::new(&raw)
            .map_err(|e| Error::configuration(format!("invalid file filter '{raw}': {e}")))
    }
}

/// Fluent builder for [`ScorerConfig`]
#[derive(Debug, Default)]
pub struct ScorerConfigBuilder {
    file_prefix: Option<String>,
    file_suffix: Option<String>,
    test_name_pattern: Option<String>,
    test_name_replacement: Option<String>,
    fp_positions: Option<FpPositions>,
    parallel: bool,
}

impl ScorerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = Some(prefix.into());
        self
    }

    pub fn file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = Some(suffix.into());
        self
    }

    /// Regex substitution mapping gold file names to test file names
    pub fn test_name(
        mut self,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.test_name_pattern = Some(pattern.into());
        self.test_name_replacement = Some(replacement.into());
        self
    }

    pub fn fp_positions(mut self, positions: FpPositions) -> Self {
        self.fp_positions = Some(positions);
        self
    }

    /// Score documents on the rayon pool (requires the `parallel` feature)
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn build(self) -> Result<ScorerConfig> {
        let pattern = self
            .test_name_pattern
            .unwrap_or_else(|| defaults::TEST_NAME_PATTERN.to_string());
        let test_name_pattern = Regex::new(&pattern).map_err(|e| {
            Error::configuration(format!("invalid test name pattern '{pattern}': {e}"))
        })?;

        if self.parallel && !cfg!(feature = "parallel") {
            log::warn!("parallel scoring requested but the `parallel` feature is disabled");
        }

        Ok(ScorerConfig {
            file_prefix: self.file_prefix.unwrap_or_default(),
            file_suffix: self
                .file_suffix
                .unwrap_or_else(|| defaults::FILE_SUFFIX.to_string()),
            test_name_pattern,
            test_name_replacement: self
                .test_name_replacement
                .unwrap_or_else(|| defaults::TEST_NAME_REPLACEMENT.to_string()),
            fp_positions: self.fp_positions.unwrap_or_default(),
            parallel: self.parallel,
        })
    }
}

/// Scores a test corpus against a gold corpus
#[derive(Debug, Clone)]
pub struct CorpusScorer {
    gold_profile: SchemaProfile,
    test_profile: SchemaProfile,
    config: ScorerConfig,
}

impl CorpusScorer {
    pub fn new(
        gold_profile: SchemaProfile,
        test_profile: SchemaProfile,
        config: ScorerConfig,
    ) -> Self {
        Self {
            gold_profile,
            test_profile,
            config,
        }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Gold document names matching the file filter, sorted
    pub fn gold_files(&self, gold_dir: &Path) -> Result<Vec<String>> {
        let filter = self.config.gold_filter()?;
        let entries = fs::read_dir(gold_dir).map_err(|e| Error::io(gold_dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(gold_dir, e))?;
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
                continue;
            };
            if filter.matches_with(&name, GOLD_MATCH_OPTIONS) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Score every gold document in `gold_dir` against `test_dir`.
    pub fn score(&self, gold_dir: &Path, test_dir: &Path) -> Result<ScoreCard> {
        self.score_with_progress(gold_dir, test_dir, |_| {})
    }

    /// Like [`score`](Self::score), calling `on_file` after each document.
    ///
    /// The first failing document aborts the run.
    pub fn score_with_progress<F>(
        &self,
        gold_dir: &Path,
        test_dir: &Path,
        on_file: F,
    ) -> Result<ScoreCard>
    where
        F: Fn(&str) + Sync,
    {
        let files = self.gold_files(gold_dir)?;
        log::info!(
            "Scoring {} gold document(s) from {} against {}",
            files.len(),
            gold_dir.display(),
            test_dir.display()
        );

        let outcomes = self.score_files(&files, gold_dir, test_dir, &on_file)?;

        let mut card = ScoreCard::new();
        for (file, records) in files.into_iter().zip(outcomes) {
            card.add_file(file);
            card.extend(records);
        }

        log::info!("Score card holds {} outcome(s)", card.len());
        Ok(card)
    }

    #[cfg(feature = "parallel")]
    fn score_files<F>(
        &self,
        files: &[String],
        gold_dir: &Path,
        test_dir: &Path,
        on_file: &F,
    ) -> Result<Vec<Vec<OutcomeRecord>>>
    where
        F: Fn(&str) + Sync,
    {
        use rayon::prelude::*;

        if self.config.parallel {
            return files
                .par_iter()
                .map(|name| self.score_file(name, gold_dir, test_dir, on_file))
                .collect();
        }
        files
            .iter()
            .map(|name| self.score_file(name, gold_dir, test_dir, on_file))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score_files<F>(
        &self,
        files: &[String],
        gold_dir: &Path,
        test_dir: &Path,
        on_file: &F,
    ) -> Result<Vec<Vec<OutcomeRecord>>>
    where
        F: Fn(&str) + Sync,
    {
        files
            .iter()
            .map(|name| self.score_file(name, gold_dir, test_dir, on_file))
            .collect()
    }

    fn score_file<F>(
        &self,
        gold_name: &str,
        gold_dir: &Path,
        test_dir: &Path,
        on_file: &F,
    ) -> Result<Vec<OutcomeRecord>>
    where
        F: Fn(&str) + Sync,
    {
        let gold_path = gold_dir.join(gold_name);
        let test_path = test_dir.join(self.config.test_name_for(gold_name));

        if !test_path.is_file() {
            return Err(Error::Correspondence {
                gold: gold_path,
                test: test_path,
            });
        }

        let gold = extract_annotations(&gold_path, &self.gold_profile)?;
        let test = extract_annotations(&test_path, &self.test_profile)?;
        let outcomes = align(gold_name, &gold, &test, self.config.fp_positions);

        on_file(gold_name);
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_name_substitution() {
        let config = ScorerConfig::builder().build().unwrap();
        assert_eq!(config.test_name_for("0001.xml"), "0001.txt");
        assert_eq!(config.test_name_for("xml-notes.xml"), "xml-notes.txt");
        assert_eq!(config.test_name_for("0001.XML"), "0001.XML");
    }

    #[test]
    fn test_custom_test_name_substitution() {
        let config = ScorerConfig::builder()
            .test_name(r"\.xml$", ".xmi")
            .build()
            .unwrap();
        assert_eq!(config.test_name_for("note_12.xml"), "note_12.xmi");
    }

    #[test]
    fn test_invalid_test_name_pattern() {
        let result = ScorerConfig::builder().test_name("(xml", "txt").build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_gold_filter_escapes_glob_characters() {
        let config = ScorerConfig::builder()
            .file_prefix("[a]")
            .file_suffix(".xml")
            .build()
            .unwrap();
        let filter = config.gold_filter().unwrap();
        assert!(filter.matches_with("[a]-0001.xml", GOLD_MATCH_OPTIONS));
        assert!(!filter.matches_with("a-0001.xml", GOLD_MATCH_OPTIONS));
    }

    #[test]
    fn test_gold_files_skip_hidden_files() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["0001.xml", ".0001.xml", "0002.xml", ".xml"] {
            fs::write(dir.path().join(name), "<doc/>").unwrap();
        }

        let scorer = CorpusScorer::new(
            SchemaProfile::builtin(crate::profile::REFERENCE_PROFILE, Default::default())
                .unwrap(),
            SchemaProfile::builtin(crate::profile::COMPARISON_PROFILE, Default::default())
                .unwrap(),
            ScorerConfig::builder().build().unwrap(),
        );
        assert_eq!(
            scorer.gold_files(dir.path()).unwrap(),
            vec!["0001.xml", "0002.xml"]
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = ScorerConfig::builder().build().unwrap();
        assert_eq!(config.file_suffix, ".xml");
        assert!(config.file_prefix.is_empty());
        assert_eq!(config.fp_positions, FpPositions::Test);
        assert!(!config.parallel);
    }
}
