//! Configuration system for litq.
//!
//! litq uses TOML configuration files named `.litq.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.litq.toml` files
//! found, then loading `~/.litq.toml` as the per-user config with lowest precedence.
//!
//! The merged [`Config`] carries parser settings and the sources of the keyword snapshot:
//! explicit names, keyword mappings, JSON schemas and search mappings. [`Config::query_parser`]
//! turns it into a ready [`QueryParser`].
//!
//! ```toml
//! [parser]
//! max_depth = 32
//! nested_keywords = ["refersto", "citedby"]
//! bound_keywords = ["topcite"]
//!
//! [keywords]
//! restrict = true
//! names = ["author", "title"]
//! mapping = { a = "author", t = ["title", "title.title"] }
//! json_schemas = ["schemas/record.json"]
//! search_mappings = "mappings/records.json"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod sources;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, ConfigFiles, user_config_path};
pub use error::ConfigError;
use litq_query::{
    DEFAULT_BOUND_KEYWORDS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_OPERATORS, DEFAULT_NESTED_KEYWORDS,
    KeywordSet, QueryParser,
};
use log::debug;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawKeywordSettings, RawMappingTarget, RawParserSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_path;
use serde::Serialize;
pub use sources::{property_paths, schema_keywords, search_mapping_keywords};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for litq.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.litq.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parser settings.
    pub parser: ParserSettings,
    /// Keyword snapshot settings.
    pub keywords: KeywordSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.litq.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.litq.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.litq.toml` if it exists and no project file is a root
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&ConfigFiles::discover(cwd).in_precedence_order())
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                debug!("loading config file {}", path.display());
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Builds the keyword snapshot from every configured source.
    ///
    /// JSON schemas and search mappings are read now; later changes to those files do not
    /// affect the returned set.
    pub fn keyword_set(&self) -> Result<KeywordSet, ConfigError> {
        let mut set: KeywordSet = self
            .keywords
            .names
            .iter()
            .chain(&self.keywords.mapping)
            .cloned()
            .collect();

        for path in &self.keywords.json_schemas {
            set.extend(schema_keywords(path)?);
        }
        for path in &self.keywords.search_mappings {
            set.extend(search_mapping_keywords(path)?);
        }

        debug!("keyword snapshot has {} keywords", set.len());
        Ok(set)
    }

    /// Returns a parser configured from these settings.
    ///
    /// With `restrict` set the parser only accepts keywords from [`Config::keyword_set`];
    /// otherwise any keyword-shaped token is accepted.
    pub fn query_parser(&self) -> Result<QueryParser, ConfigError> {
        let parser = if self.keywords.restrict {
            QueryParser::new().with_keywords(self.keyword_set()?)
        } else {
            QueryParser::new()
        };

        Ok(parser
            .with_max_depth(self.parser.max_depth)
            .with_max_operators(self.parser.max_operators)
            .with_nested_keywords(self.parser.nested_keywords.iter().cloned())
            .with_bound_keywords(self.parser.bound_keywords.iter().cloned()))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A zero `max_depth`
    /// - `restrict = true` without any keyword source
    /// - JSON schema and search mapping files that don't exist
    /// - Nested keywords missing from a restricted keyword set
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output is itself a valid `.litq.toml`. Mapping keys are listed with the keyword
    /// names since only the keys affect parsing, and source paths are shown resolved.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let names: BTreeSet<&str> = self
            .keywords
            .names
            .iter()
            .chain(&self.keywords.mapping)
            .map(String::as_str)
            .collect();

        let serializable = SerializableSettings {
            parser: &self.parser,
            keywords: SerializableKeywordSettings {
                restrict: self.keywords.restrict,
                names,
                json_schemas: display_paths(&self.keywords.json_schemas),
                search_mappings: display_paths(&self.keywords.search_mappings),
            },
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserSettings {
    /// Maximum nesting depth of groups, negations and nested field queries.
    pub max_depth: usize,
    /// Maximum number of chained `and`/`or` operators.
    pub max_operators: usize,
    /// Keywords whose value may itself be a field query.
    pub nested_keywords: Vec<String>,
    /// Keywords that read `200+` as `>= 200` and `200-` as `<= 200`.
    pub bound_keywords: Vec<String>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_operators: DEFAULT_MAX_OPERATORS,
            nested_keywords: DEFAULT_NESTED_KEYWORDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            bound_keywords: DEFAULT_BOUND_KEYWORDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Sources of the keyword snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSettings {
    /// Whether the parser accepts only known keywords.
    pub restrict: bool,
    /// Explicit keyword names.
    pub names: BTreeSet<String>,
    /// Keywords defined by the keyword mapping, including keys of nested mapping tables.
    pub mapping: BTreeSet<String>,
    /// Resolved JSON schema paths, highest precedence first.
    pub json_schemas: Vec<PathBuf>,
    /// Resolved search mapping paths, highest precedence first.
    pub search_mappings: Vec<PathBuf>,
}

impl KeywordSettings {
    /// Whether any keyword source is configured.
    pub fn has_sources(&self) -> bool {
        !self.names.is_empty()
            || !self.mapping.is_empty()
            || !self.json_schemas.is_empty()
            || !self.search_mappings.is_empty()
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Parser settings.
    parser: &'a ParserSettings,
    /// Keyword settings.
    keywords: SerializableKeywordSettings<'a>,
}

/// Keyword settings in config file form.
#[derive(Serialize)]
struct SerializableKeywordSettings<'a> {
    /// Whether the parser accepts only known keywords.
    restrict: bool,
    /// Names and mapping keys together, sorted.
    names: BTreeSet<&'a str>,
    /// Resolved JSON schema paths.
    json_schemas: Vec<String>,
    /// Resolved search mapping paths.
    search_mappings: Vec<String>,
}

/// Renders paths for TOML output.
fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}
