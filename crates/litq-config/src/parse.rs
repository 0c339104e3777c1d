//! Configuration file parsing.
//!
//! Parses individual `.litq.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and skip parent and per-user configs.
    pub root: Option<bool>,
    /// Parser settings section.
    pub parser: Option<RawParserSettings>,
    /// Keyword snapshot section.
    pub keywords: Option<RawKeywordSettings>,
}

/// Raw parser settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParserSettings {
    /// Maximum nesting depth of groups, negations and nested field queries.
    pub max_depth: Option<usize>,
    /// Maximum number of chained `and`/`or` operators.
    pub max_operators: Option<usize>,
    /// Keywords whose value may itself be a field query.
    pub nested_keywords: Option<Vec<String>>,
    /// Keywords that read `200+`/`200-` as bounds.
    pub bound_keywords: Option<Vec<String>>,
}

/// Raw keyword settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawKeywordSettings {
    /// When true, only keywords in the snapshot are accepted.
    pub restrict: Option<bool>,
    /// Explicit keyword names.
    pub names: Option<Vec<String>>,
    /// Keyword mapping: keyword -> search field(s).
    pub mapping: Option<BTreeMap<String, RawMappingTarget>>,
    /// JSON schema files whose property paths are keywords.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub json_schemas: Option<Vec<String>>,
    /// Search mapping files whose property paths are keywords.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub search_mappings: Option<Vec<String>>,
}

/// Target of a keyword mapping entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawMappingTarget {
    /// A single search field.
    Field(String),
    /// Several search fields.
    Fields(Vec<String>),
    /// A table of sub-keywords; its keys are keywords too.
    Table(BTreeMap<String, toml::Value>),
}

impl RawMappingTarget {
    /// Keys of a nested mapping table, empty for plain targets.
    pub fn sub_keywords(&self) -> impl Iterator<Item = &str> {
        let table = match self {
            Self::Table(table) => Some(table),
            Self::Field(_) | Self::Fields(_) => None,
        };
        table.into_iter().flat_map(|t| t.keys().map(String::as_str))
    }
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
