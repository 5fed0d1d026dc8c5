//! Removal of git metadata from a cloned working tree
//!
//! For a directory the stripper:
//!
//! 1. detaches the `origin` remote, if the directory carries metadata
//! 2. strips every submodule declared in `.gitmodules` the same way
//! 3. deletes the `.git` directory (or gitfile)
//!
//! Submodules are handled before the parent metadata goes away, because a
//! submodule's gitfile points into the parent's `.git/modules`. Running the
//! stripper again on an already stripped tree does nothing.

use super::client::GitClient;
use crate::constants::git::{METADATA_DIR, ORIGIN_REMOTE, SUBMODULES_FILE};
use crate::error::HarvestError;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// What a [`MetadataStripper::strip`] call did
#[derive(Debug, Default)]
pub struct StripReport {
    /// Directories whose metadata was deleted
    pub stripped: Vec<PathBuf>,
    /// Directories whose `origin` remote was removed
    pub detached: Vec<PathBuf>,
    /// Non-fatal problems, one message each
    pub errors: Vec<String>,
}

impl StripReport {
    pub fn is_noop(&self) -> bool {
        self.stripped.is_empty() && self.detached.is_empty() && self.errors.is_empty()
    }
}

pub struct MetadataStripper<'a> {
    git: &'a dyn GitClient,
}

impl<'a> MetadataStripper<'a> {
    pub fn new(git: &'a dyn GitClient) -> Self {
        Self { git }
    }

    pub fn strip(&self, dir: &Path) -> StripReport {
        let mut report = StripReport::default();
        let mut visited = HashSet::new();
        self.strip_dir(dir, &mut report, &mut visited);
        report
    }

    fn strip_dir(&self, dir: &Path, report: &mut StripReport, visited: &mut HashSet<PathBuf>) {
        let key = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        if !visited.insert(key) {
            return;
        }

        let metadata = dir.join(METADATA_DIR);
        // Querying without local metadata would reach an enclosing repository
        if metadata.exists() {
            self.detach_origin(dir, report);
        }

        for submodule in declared_submodules(dir) {
            self.strip_dir(&dir.join(submodule), report, visited);
        }

        if metadata.exists() {
            match remove_metadata(&metadata) {
                Ok(()) => {
                    tracing::info!("Deleted .git folder in: {}", dir.display());
                    report.stripped.push(dir.to_path_buf());
                }
                Err(e) => {
                    let error = HarvestError::StripFailure {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    };
                    tracing::error!("{error}");
                    report.errors.push(error.to_string());
                }
            }
        }
    }

    fn detach_origin(&self, dir: &Path, report: &mut StripReport) {
        match self.git.has_remote(dir, ORIGIN_REMOTE) {
            Ok(true) => match self.git.remove_remote(dir, ORIGIN_REMOTE) {
                Ok(()) => {
                    tracing::info!("Removed remote 'origin' from: {}", dir.display());
                    report.detached.push(dir.to_path_buf());
                }
                // The metadata is deleted right after, so a stuck remote is harmless
                Err(e) => tracing::warn!("Error removing remote from {}: {e:#}", dir.display()),
            },
            Ok(false) => tracing::info!("No remote 'origin' found in: {}", dir.display()),
            Err(e) => tracing::warn!("Could not query remotes in {}: {e:#}", dir.display()),
        }
    }
}

fn remove_metadata(metadata: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(metadata)?.is_dir() {
        fs::remove_dir_all(metadata)
    } else {
        fs::remove_file(metadata)
    }
}

/// Relative submodule paths declared in `dir/.gitmodules`
///
/// A missing or unreadable file yields no paths. Lines that are not a
/// `path = ...` assignment are ignored, as are paths that are absolute or
/// climb out of `dir`.
pub fn declared_submodules(dir: &Path) -> Vec<PathBuf> {
    let file = dir.join(SUBMODULES_FILE);
    let content = match fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No submodules found in {}", dir.display());
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Error reading {}: {e}", file.display());
            return Vec::new();
        }
    };

    parse_submodule_paths(&content)
        .into_iter()
        .filter(|path| {
            let safe = is_contained(path);
            if !safe {
                tracing::warn!(
                    "Skipping submodule path '{}' declared in {}",
                    path.display(),
                    file.display()
                );
            }
            safe
        })
        .collect()
}

/// Every `path = <value>` in a `.gitmodules` body, in declaration order
pub fn parse_submodule_paths(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| key.trim() == "path")
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
