//! Locating `.litq.toml` files.
//!
//! Project files come from the working directory and its ancestors, nearest first, up to the
//! first file with `root = true`. The per-user file in the home directory ranks below every
//! project file and is skipped once a root file has been found.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".litq.toml";

/// The `.litq.toml` files that apply to one working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    /// Project files, nearest to the working directory first.
    pub project: Vec<PathBuf>,
    /// The per-user file, if it exists and no project file is a root.
    pub user: Option<PathBuf>,
}

impl ConfigFiles {
    /// Finds the files for `cwd`, with `~/.litq.toml` as the per-user file.
    pub fn discover(cwd: &Path) -> Self {
        Self::discover_with_user_file(cwd, user_config_path().as_deref())
    }

    /// Finds the files for `cwd` with an explicit per-user file, or none at all.
    pub fn discover_with_user_file(cwd: &Path, user_file: Option<&Path>) -> Self {
        let mut project = Vec::new();
        for dir in cwd.ancestors() {
            let path = dir.join(CONFIG_FILENAME);
            if !path.is_file() {
                continue;
            }
            let root = is_root_config(&path);
            debug!("found config file {} (root: {root})", path.display());
            project.push(path);
            if root {
                return Self {
                    project,
                    user: None,
                };
            }
        }

        let user = user_file
            .filter(|path| path.is_file() && !project.iter().any(|p| p == path))
            .map(Path::to_path_buf);
        if let Some(path) = &user {
            debug!("found user config file {}", path.display());
        }
        Self { project, user }
    }

    /// Returns `true` if no file applies.
    pub fn is_empty(&self) -> bool {
        self.project.is_empty() && self.user.is_none()
    }

    /// All files in merge order, highest precedence first.
    pub fn in_precedence_order(&self) -> Vec<PathBuf> {
        self.project.iter().chain(&self.user).cloned().collect()
    }
}

/// Path of the per-user config file, `~/.litq.toml`.
///
/// Returns `None` if the home directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}
