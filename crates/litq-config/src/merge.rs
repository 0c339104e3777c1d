//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, KeywordSettings, ParserSettings,
    parse::{RawConfig, RawKeywordSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory that relative paths in this file are resolved against.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (the per-user config).
///
/// Merge rules:
/// - Scalar settings, `nested_keywords` and `bound_keywords`: first defined value wins (highest precedence)
/// - Keyword names and mapping keys: accumulated across all files
/// - JSON schema and search mapping files: accumulated, resolved against the directory of
///   the file that names them
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let parser = merge_parser_settings(configs);
    let keywords = merge_keyword_settings(configs)?;
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        parser,
        keywords,
        config_root,
    })
}

/// Merges parser settings, taking first defined value for each field.
fn merge_parser_settings(configs: &[ParsedConfig]) -> ParserSettings {
    let mut result = ParserSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let Some(ref raw) = parsed.config.parser else {
            continue;
        };
        if let Some(v) = raw.max_depth {
            result.max_depth = v;
        }
        if let Some(v) = raw.max_operators {
            result.max_operators = v;
        }
        if let Some(ref v) = raw.nested_keywords {
            result.nested_keywords.clone_from(v);
        }
        if let Some(ref v) = raw.bound_keywords {
            result.bound_keywords.clone_from(v);
        }
    }

    result
}

/// Merges keyword settings from all configs.
fn merge_keyword_settings(configs: &[ParsedConfig]) -> Result<KeywordSettings, ConfigError> {
    let mut result = KeywordSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(restrict) = parsed
            .config
            .keywords
            .as_ref()
            .and_then(|raw| raw.restrict)
        {
            result.restrict = restrict;
        }
    }

    // Sources in precedence order, highest first
    for parsed in configs {
        if let Some(ref raw) = parsed.config.keywords {
            apply_keyword_sources(&mut result, raw, parsed.dir())?;
        }
    }

    Ok(result)
}

/// Adds the names, mapping keys and source files of one config.
fn apply_keyword_sources(
    result: &mut KeywordSettings,
    raw: &RawKeywordSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref names) = raw.names {
        result.names.extend(names.iter().cloned());
    }

    if let Some(ref mapping) = raw.mapping {
        for (keyword, target) in mapping {
            result.mapping.insert(keyword.clone());
            result
                .mapping
                .extend(target.sub_keywords().map(String::from));
        }
    }

    for path in raw.json_schemas.iter().flatten() {
        push_unique(&mut result.json_schemas, resolve_path(path, config_dir)?);
    }
    for path in raw.search_mappings.iter().flatten() {
        push_unique(&mut result.search_mappings, resolve_path(path, config_dir)?);
    }

    Ok(())
}

/// Appends a path unless it is already listed.
fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}
