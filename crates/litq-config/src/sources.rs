//! Keyword extraction from JSON schemas and search mappings.
//!
//! Both formats describe records as nested `properties` objects. Every property yields
//! a keyword named by its dotted path from the top (`authors`, `authors.full_name`).
//! Array schemas contribute the properties of their `items`.

use std::{collections::BTreeSet, fs, path::Path};

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::ConfigError;

/// Extracts keywords from a JSON schema file.
///
/// A schema without a top-level `properties` object yields no keywords.
pub fn schema_keywords(path: &Path) -> Result<BTreeSet<String>, ConfigError> {
    let schema = read_json(path)?;
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        warn!("JSON schema {} has no properties", path.display());
        return Ok(BTreeSet::new());
    };

    let keywords = property_paths(properties);
    debug!("{} keywords from JSON schema {}", keywords.len(), path.display());
    Ok(keywords)
}

/// Extracts keywords from a search mapping file.
///
/// Accepts both typed (`mappings.<type>.properties`) and typeless
/// (`mappings.properties`) mappings. Keywords of all document types are merged.
pub fn search_mapping_keywords(path: &Path) -> Result<BTreeSet<String>, ConfigError> {
    let document = read_json(path)?;
    let Some(mappings) = document.get("mappings").and_then(Value::as_object) else {
        return Err(ConfigError::MissingMappings {
            path: path.to_path_buf(),
        });
    };

    let mut keywords = BTreeSet::new();
    if let Some(properties) = mappings.get("properties").and_then(Value::as_object) {
        collect_paths(properties, "", &mut keywords);
    } else {
        for properties in mappings
            .values()
            .filter_map(|doc_type| doc_type.get("properties"))
            .filter_map(Value::as_object)
        {
            collect_paths(properties, "", &mut keywords);
        }
    }

    if keywords.is_empty() {
        warn!("search mapping {} has no properties", path.display());
    }
    debug!("{} keywords from search mapping {}", keywords.len(), path.display());
    Ok(keywords)
}

/// Returns the dotted path of every property in a `properties` object.
pub fn property_paths(properties: &Map<String, Value>) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_paths(properties, "", &mut paths);
    paths
}

/// Adds the paths below `prefix` to `out`.
fn collect_paths(properties: &Map<String, Value>, prefix: &str, out: &mut BTreeSet<String>) {
    for (name, definition) in properties {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        collect_nested(definition, &path, out);
        out.insert(path);
    }
}

/// Descends into the sub-properties of a single property definition.
fn collect_nested(definition: &Value, path: &str, out: &mut BTreeSet<String>) {
    match definition.get("items") {
        Some(Value::Array(items)) => {
            for item in items {
                collect_nested(item, path, out);
            }
        }
        Some(item) => collect_nested(item, path, out),
        None => {}
    }

    if let Some(properties) = definition.get("properties").and_then(Value::as_object) {
        collect_paths(properties, path, out);
    }
}

/// Reads and parses a JSON file.
fn read_json(path: &Path) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}
