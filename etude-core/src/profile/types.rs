use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::Score;

/// On-disk layout of a schema profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub metadata: MetadataConfig,
    /// Prefix to namespace URI bindings usable in selectors and attribute names
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub default_score: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub long_name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    /// Patterns without a selector are not extracted
    #[serde(default)]
    pub xpath: Option<String>,
    #[serde(default)]
    pub begin_attr: Option<String>,
    #[serde(default)]
    pub end_attr: Option<String>,
    #[serde(default)]
    pub text_attr: Option<String>,
}
