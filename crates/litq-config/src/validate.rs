//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `max_depth` is zero, so every group and negation fails.
    ZeroMaxDepth,
    /// Keywords are restricted but nothing defines any.
    RestrictWithoutSources,
    /// A JSON schema file does not exist.
    JsonSchemaMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// A search mapping file does not exist.
    SearchMappingMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// A keyword source exists but could not be turned into keywords.
    SourceUnreadable {
        /// The load error, rendered.
        error: String,
    },
    /// A nested keyword is not in the restricted keyword set, so it can never match.
    NestedKeywordUnknown {
        /// The nested keyword.
        keyword: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxDepth => {
                write!(f, "max_depth is 0: groups and negations will always fail")
            }
            Self::RestrictWithoutSources => {
                write!(f, "keywords are restricted but no keyword sources are defined")
            }
            Self::JsonSchemaMissing { path } => {
                write!(f, "JSON schema does not exist: {path}")
            }
            Self::SearchMappingMissing { path } => {
                write!(f, "search mapping does not exist: {path}")
            }
            Self::SourceUnreadable { error } => {
                write!(f, "keyword source unusable: {error}")
            }
            Self::NestedKeywordUnknown { keyword } => {
                write!(f, "nested keyword '{keyword}' is not a known keyword")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - A zero nesting limit
/// - Restricted keywords with no keyword sources
/// - JSON schema and search mapping files that don't exist
/// - Existing source files that fail to load, when keywords are restricted
/// - Nested keywords missing from the restricted keyword set
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.parser.max_depth == 0 {
        warnings.push(ConfigWarning::ZeroMaxDepth);
    }

    let keywords = &config.keywords;
    let before = warnings.len();
    for path in keywords.json_schemas.iter().filter(|p| !p.is_file()) {
        warnings.push(ConfigWarning::JsonSchemaMissing { path: display(path) });
    }
    for path in keywords.search_mappings.iter().filter(|p| !p.is_file()) {
        warnings.push(ConfigWarning::SearchMappingMissing { path: display(path) });
    }

    if !keywords.restrict {
        return warnings;
    }

    if !keywords.has_sources() {
        warnings.push(ConfigWarning::RestrictWithoutSources);
        return warnings;
    }

    // Missing files already have a warning each.
    if warnings.len() > before {
        return warnings;
    }

    match config.keyword_set() {
        Ok(known) => {
            for keyword in &config.parser.nested_keywords {
                if !known.contains(keyword) {
                    warnings.push(ConfigWarning::NestedKeywordUnknown {
                        keyword: keyword.clone(),
                    });
                }
            }
        }
        Err(err) => warnings.push(ConfigWarning::SourceUnreadable {
            error: err.to_string(),
        }),
    }

    warnings
}

/// Renders a path for a warning message.
fn display(path: &Path) -> String {
    path.display().to_string()
}
