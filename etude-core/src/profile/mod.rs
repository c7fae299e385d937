//! Schema profiles describing where annotations live in a document format
//!
//! A profile is pure data: a namespace table, a default outcome label and
//! one or more patterns. Built-in profiles are embedded TOML files; custom
//! ones load from disk with the same layout:
//!
//! ```toml
//! [metadata]
//! name = "webanno"
//! default_score = "FP"
//!
//! [namespaces]
//! custom = "http:///webanno/custom.ecore"
//!
//! [[patterns]]
//! long_name = "Protected Health Information"
//! short_name = "PHI"
//! xpath = ".//custom:PHI"
//! begin_attr = "begin"
//! end_attr = "end"
//! ```

pub mod loader;
pub mod selector;
pub mod types;

pub use loader::{get_profile_config, list_available_profiles};
pub use selector::{QualifiedName, Selector};
pub use types::{MetadataConfig, PatternConfig, ProfileConfig};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::domain::Score;
use crate::error::{Error, Result};

/// Built-in profile for reference (gold) corpora
pub const REFERENCE_PROFILE: &str = "i2b2_2016_track-1";

/// Built-in profile for system output (test) corpora
pub const COMPARISON_PROFILE: &str = "CAS XMI";

/// Which pattern name becomes the annotation category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKey {
    #[default]
    LongName,
    ShortName,
    Parent,
}

impl ScoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKey::LongName => "long_name",
            ScoreKey::ShortName => "short_name",
            ScoreKey::Parent => "parent",
        }
    }

    /// Category for `pattern`, falling back to its long name
    fn category(&self, pattern: &PatternConfig) -> String {
        let chosen = match self {
            ScoreKey::LongName => None,
            ScoreKey::ShortName => pattern.short_name.as_ref(),
            ScoreKey::Parent => pattern.parent.as_ref(),
        };
        chosen.unwrap_or(&pattern.long_name).clone()
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "long_name" => Ok(ScoreKey::LongName),
            "short_name" => Ok(ScoreKey::ShortName),
            "parent" => Ok(ScoreKey::Parent),
            other => Err(Error::configuration(format!(
                "invalid score key '{other}' (choose from long_name, short_name, parent)"
            ))),
        }
    }
}

/// A compiled pattern: where to find spans and how to read them
#[derive(Debug, Clone)]
pub struct Pattern {
    pub selector: Selector,
    pub begin_attr: Option<QualifiedName>,
    pub end_attr: Option<QualifiedName>,
    /// `None` reads the element's text content
    pub text_attr: Option<QualifiedName>,
    pub category: String,
}

/// A validated profile ready for extraction
#[derive(Debug, Clone)]
pub struct SchemaProfile {
    name: String,
    default_score: Score,
    namespaces: BTreeMap<String, String>,
    patterns: Vec<Pattern>,
}

impl SchemaProfile {
    /// Resolve a built-in profile by name.
    pub fn builtin(name: &str, score_key: ScoreKey) -> Result<Self> {
        Self::from_config(get_profile_config(name)?, score_key)
    }

    /// Load a profile from a TOML file.
    pub fn from_file(path: &Path, score_key: ScoreKey) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content, score_key).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str, score_key: ScoreKey) -> Result<Self> {
        let config: ProfileConfig = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("failed to parse profile: {e}")))?;
        Self::from_config(&config, score_key)
    }

    pub fn from_config(config: &ProfileConfig, score_key: ScoreKey) -> Result<Self> {
        let name = config.metadata.name.trim();
        if name.is_empty() {
            return Err(Error::configuration("profile name cannot be empty"));
        }

        let namespaces = &config.namespaces;
        let resolve = |attr: &Option<String>| -> Result<Option<QualifiedName>> {
            attr.as_deref()
                .map(|raw| QualifiedName::resolve(raw, namespaces))
                .transpose()
        };

        let mut patterns = Vec::with_capacity(config.patterns.len());
        for pattern in &config.patterns {
            let Some(xpath) = pattern.xpath.as_deref() else {
                log::debug!(
                    "Profile {name}: skipping pattern '{}' without xpath",
                    pattern.long_name
                );
                continue;
            };

            patterns.push(Pattern {
                selector: Selector::parse(xpath, namespaces)?,
                begin_attr: resolve(&pattern.begin_attr)?,
                end_attr: resolve(&pattern.end_attr)?,
                text_attr: resolve(&pattern.text_attr)?,
                category: score_key.category(pattern),
            });
        }

        if patterns.is_empty() {
            return Err(Error::configuration(format!(
                "profile '{name}' has no pattern with an xpath"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            default_score: config.metadata.default_score,
            namespaces: namespaces.clone(),
            patterns,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_score(&self) -> Score {
        self.default_score
    }

    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}
