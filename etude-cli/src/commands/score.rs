//! Score command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use etude_core::application::scorer::defaults;
use etude_core::{
    CorpusScorer, FpPositions, Metric, Report, ScoreCard, ScoreKey, ScorerConfig,
    COMPARISON_PROFILE, REFERENCE_PROFILE,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{CorpusDirs, ProfileSource};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;

/// Default field delimiter for text output
pub const DEFAULT_DELIMITER: &str = "\t";

/// Arguments for the score command
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Directory containing gold reference set
    #[arg(value_name = "GOLD_DIR")]
    pub gold_dir: PathBuf,

    /// Directory containing reference set to score
    #[arg(value_name = "TEST_DIR")]
    pub test_dir: PathBuf,

    /// Print one row per gold document; repeat to raise the log level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// List of metrics to return, in order [default: TP FP TN FN]
    #[arg(
        short,
        long,
        value_name = "METRIC",
        num_args = 1..,
        value_delimiter = ',',
        value_parser = parse_metric
    )]
    pub metrics: Option<Vec<Metric>>,

    /// Delimiter used in all output streams [default: tab]
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only score gold files whose name starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub file_prefix: Option<String>,

    /// Only score gold files whose name ends with this suffix [default: .xml]
    #[arg(long, value_name = "SUFFIX")]
    pub file_suffix: Option<String>,

    /// Regex applied to gold file names to derive test file names [default: xml$]
    #[arg(long, value_name = "REGEX")]
    pub test_name_pattern: Option<String>,

    /// Replacement for --test-name-pattern matches [default: txt]
    #[arg(long, value_name = "TEXT")]
    pub test_name_replacement: Option<String>,

    /// Built-in schema profile for the gold corpus [default: i2b2_2016_track-1]
    #[arg(long, value_name = "NAME")]
    pub gold_profile: Option<String>,

    /// Built-in schema profile for the test corpus [default: "CAS XMI"]
    #[arg(long, value_name = "NAME")]
    pub test_profile: Option<String>,

    /// Schema profile file for the gold corpus (overrides --gold-profile)
    #[arg(long, value_name = "FILE")]
    pub gold_profile_file: Option<PathBuf>,

    /// Schema profile file for the test corpus (overrides --test-profile)
    #[arg(long, value_name = "FILE")]
    pub test_profile_file: Option<PathBuf>,

    /// Pattern name used as the annotation type [default: long_name]
    #[arg(long, value_name = "KEY", value_parser = parse_score_key)]
    pub score_key: Option<ScoreKey>,

    /// Positions recorded for false positives: test or last-gold [default: test]
    #[arg(long, value_name = "SOURCE", value_parser = parse_fp_positions)]
    pub fp_positions: Option<FpPositions>,

    /// Write every scored outcome to this file as JSON
    #[arg(long, value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Score documents in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for --parallel (default: all cores)
    #[arg(short, long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    s.parse().map_err(|e: etude_core::Error| e.to_string())
}

pub(crate) fn parse_score_key(s: &str) -> Result<ScoreKey, String> {
    s.parse().map_err(|e: etude_core::Error| e.to_string())
}

fn parse_fp_positions(s: &str) -> Result<FpPositions, String> {
    s.parse().map_err(|e: etude_core::Error| e.to_string())
}

/// Settings after merging flags over the configuration file
#[derive(Debug)]
pub struct ScoreSettings {
    pub metrics: Vec<Metric>,
    pub delimiter: String,
    pub format: OutputFormat,
    pub per_file: bool,
    pub gold_source: ProfileSource,
    pub test_source: ProfileSource,
    pub score_key: ScoreKey,
    pub scorer: ScorerConfig,
    pub threads: Option<usize>,
}

impl ScoreArgs {
    /// Execute the score command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting corpus scoring");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let settings = self.resolve(&file_config)?;
        let dirs = CorpusDirs::resolve(&self.gold_dir, &self.test_dir)?;

        log::info!("Gold profile: {}", settings.gold_source.display_name());
        log::info!("Test profile: {}", settings.test_source.display_name());
        let scorer = CorpusScorer::new(
            settings.gold_source.load(settings.score_key)?,
            settings.test_source.load(settings.score_key)?,
            settings.scorer,
        );

        let card = self.run(&scorer, &dirs, settings.threads)?;

        if let Some(path) = &self.ledger {
            write_ledger(path, &card)?;
            log::info!("Wrote {} outcome(s) to {}", card.len(), path.display());
        }

        let report = Report::from_score_card(&card, &settings.metrics, settings.per_file)
            .map_err(|e| CliError::ScoringError(e.to_string()))?;

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter = create_formatter(settings.format, writer, &settings.delimiter);
        formatter.format_report(&report)?;
        formatter.finish()?;

        Ok(())
    }

    /// Merge flags over `config`, rejecting invalid values before any scoring
    pub fn resolve(&self, config: &CliConfig) -> Result<ScoreSettings> {
        let metrics = match (&self.metrics, &config.report.metrics) {
            (Some(metrics), _) => metrics.clone(),
            (None, Some(names)) => {
                Metric::parse_list(names).map_err(|e| CliError::ConfigError(e.to_string()))?
            }
            (None, None) => Metric::DEFAULT.to_vec(),
        };
        if metrics.is_empty() {
            return Err(CliError::ConfigError("no metrics selected".to_string()).into());
        }

        let format = match (self.format, &config.report.format) {
            (Some(format), _) => format,
            (None, Some(name)) => OutputFormat::from_str(name, true).map_err(|_| {
                CliError::ConfigError(format!("invalid output format '{name}'"))
            })?,
            (None, None) => OutputFormat::Text,
        };

        let score_key = match (self.score_key, &config.profiles.score_key) {
            (Some(key), _) => key,
            (None, Some(name)) => name
                .parse()
                .map_err(|e: etude_core::Error| CliError::ConfigError(e.to_string()))?,
            (None, None) => ScoreKey::default(),
        };

        let fp_positions = match (self.fp_positions, &config.profiles.fp_positions) {
            (Some(positions), _) => positions,
            (None, Some(name)) => name
                .parse()
                .map_err(|e: etude_core::Error| CliError::ConfigError(e.to_string()))?,
            (None, None) => FpPositions::default(),
        };

        let threads = self.threads.or(match config.performance.worker_threads {
            0 => None,
            n => Some(n),
        });
        if threads == Some(0) {
            return Err(
                CliError::ConfigError("threads must be greater than 0".to_string()).into(),
            );
        }
        let parallel = self.parallel || config.performance.parallel;

        let corpus = &config.corpus;
        let mut builder = ScorerConfig::builder()
            .fp_positions(fp_positions)
            .parallel(parallel);
        if let Some(prefix) = self.file_prefix.as_ref().or(corpus.file_prefix.as_ref()) {
            builder = builder.file_prefix(prefix.clone());
        }
        if let Some(suffix) = self.file_suffix.as_ref().or(corpus.file_suffix.as_ref()) {
            builder = builder.file_suffix(suffix.clone());
        }
        let pattern = self
            .test_name_pattern
            .as_ref()
            .or(corpus.test_name_pattern.as_ref());
        let replacement = self
            .test_name_replacement
            .as_ref()
            .or(corpus.test_name_replacement.as_ref());
        if pattern.is_some() || replacement.is_some() {
            builder = builder.test_name(
                pattern.map_or(defaults::TEST_NAME_PATTERN, |p| p.as_str()),
                replacement.map_or(defaults::TEST_NAME_REPLACEMENT, |r| r.as_str()),
            );
        }
        let scorer = builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let profiles = &config.profiles;
        let gold_source = ProfileSource::select(
            self.gold_profile
                .clone()
                .or_else(|| profiles.gold.clone())
                .unwrap_or_else(|| REFERENCE_PROFILE.to_string()),
            self.gold_profile_file
                .clone()
                .or_else(|| profiles.gold_file.clone()),
        );
        let test_source = ProfileSource::select(
            self.test_profile
                .clone()
                .or_else(|| profiles.test.clone())
                .unwrap_or_else(|| COMPARISON_PROFILE.to_string()),
            self.test_profile_file
                .clone()
                .or_else(|| profiles.test_file.clone()),
        );

        Ok(ScoreSettings {
            metrics,
            delimiter: self
                .delimiter
                .clone()
                .or_else(|| config.report.delimiter.clone())
                .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            format,
            per_file: self.verbose > 0 || config.report.per_file,
            gold_source,
            test_source,
            score_key,
            scorer,
            threads,
        })
    }

    fn run(
        &self,
        scorer: &CorpusScorer,
        dirs: &CorpusDirs,
        threads: Option<usize>,
    ) -> Result<ScoreCard> {
        let total = scorer.gold_files(&dirs.gold)?.len();
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(total as u64);

        let score = || {
            scorer.score_with_progress(&dirs.gold, &dirs.test, |name| {
                progress.file_completed(name)
            })
        };

        let result = if scorer.config().is_parallel() {
            let threads = threads.unwrap_or_else(num_cpus::get);
            log::info!("Scoring in parallel on {threads} thread(s)");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to create thread pool")?;
            pool.install(score)
        } else {
            score()
        };
        progress.finish();

        result.map_err(|e| CliError::ScoringError(e.to_string()).into())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running inside tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn write_ledger(path: &Path, card: &ScoreCard) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create ledger file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, card)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
