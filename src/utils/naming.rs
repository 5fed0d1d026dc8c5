//! Collision-free clone target names
//!
//! The existence check is not atomic with the directory creation done later
//! by `git clone`; another process creating the same path in between is not
//! guarded against. Within this process, [`NameRegistry`] makes sure two
//! workers never receive the same target.

use crate::constants::naming::MAX_SUFFIX;
use crate::error::HarvestError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Return `parent/base`, or the first free `parent/base_N` for N in 1..=100
pub fn allocate(base_name: &str, parent: &Path) -> Result<PathBuf, HarvestError> {
    allocate_with(base_name, parent, |candidate| candidate.exists())
}

fn allocate_with(
    base_name: &str,
    parent: &Path,
    mut taken: impl FnMut(&Path) -> bool,
) -> Result<PathBuf, HarvestError> {
    let candidate = parent.join(base_name);
    if !taken(&candidate) {
        return Ok(candidate);
    }

    for i in 1..=MAX_SUFFIX {
        let candidate = parent.join(format!("{base_name}_{i}"));
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(HarvestError::NameExhausted {
        base: base_name.to_string(),
        parent: parent.to_path_buf(),
        attempts: MAX_SUFFIX,
    })
}

/// Process-wide record of targets already handed out
#[derive(Debug, Default)]
pub struct NameRegistry {
    claimed: Mutex<HashSet<PathBuf>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate like [`allocate`], also skipping names claimed earlier
    pub fn claim(&self, base_name: &str, parent: &Path) -> Result<PathBuf, HarvestError> {
        // A poisoned lock only means another worker panicked mid-claim;
        // the set itself is still consistent
        let mut claimed = self
            .claimed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let path = allocate_with(base_name, parent, |candidate| {
            candidate.exists() || claimed.contains(candidate)
        })?;
        claimed.insert(path.clone());
        Ok(path)
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// Directory name for a repository URL
///
/// Takes the last `/`- or `:`-separated segment and drops a `.git` suffix,
/// so `git@github.com:owner/tool.git` and `https://host/owner/tool/` both
/// give `tool`.
pub fn repo_base_name(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
