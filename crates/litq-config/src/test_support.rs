//! Fixture directory for litq-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary tree of config files and keyword sources, removed on drop.
pub struct TestDir {
    /// The temporary root.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory below the root.
    pub fn dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a file below the root, creating parents.
    pub fn write(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a `.litq.toml` into `rel_dir`.
    pub fn config(&self, rel_dir: &str, toml: &str) -> PathBuf {
        self.write(&Path::new(rel_dir).join(CONFIG_FILENAME).to_string_lossy(), toml)
    }

    /// Writes a JSON schema whose top-level properties are `keywords`.
    pub fn schema(&self, rel_path: &str, keywords: &[&str]) -> PathBuf {
        let schema = json!({ "type": "object", "properties": object_properties(keywords) });
        self.write(rel_path, &schema.to_string())
    }

    /// Writes a typeless search mapping whose properties are `keywords`.
    pub fn search_mapping(&self, rel_path: &str, keywords: &[&str]) -> PathBuf {
        let mapping = json!({ "mappings": { "properties": object_properties(keywords) } });
        self.write(rel_path, &mapping.to_string())
    }
}

/// A `properties` object with one empty entry per keyword.
fn object_properties(keywords: &[&str]) -> Map<String, Value> {
    keywords
        .iter()
        .map(|k| ((*k).to_string(), json!({})))
        .collect()
}
