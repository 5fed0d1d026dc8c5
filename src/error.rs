//! Error taxonomy for clone runs
//!
//! Application plumbing uses `anyhow`; these typed errors describe the
//! per-row and per-entry failures that end up in the run summary.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    /// Configuration file absent; defaults are applied
    #[error("Configuration file '{}' not found. Using defaults.", .0.display())]
    ConfigMissing(PathBuf),

    /// Manifest file absent; the manifest run cannot start
    #[error("The manifest file '{}' does not exist.", .0.display())]
    ManifestMissing(PathBuf),

    /// Header line unusable; no row can be read
    #[error("Invalid manifest header: {0}")]
    ManifestHeader(String),

    /// Malformed manifest row
    #[error("Error in manifest line {line}: {message}")]
    Manifest { line: usize, message: String },

    /// `depth` column that is not a positive integer
    #[error("Error in manifest line {line}: invalid depth '{value}' (expected a positive integer)")]
    InvalidDepth { line: usize, value: String },

    #[error("Error cloning {url}: {message}")]
    CloneFailure { url: String, message: String },

    #[error("Error stripping metadata in {}: {message}", .path.display())]
    StripFailure { path: PathBuf, message: String },

    #[error("Error executing post-cloning hook in {}: {message}", .target.display())]
    HookFailure { target: PathBuf, message: String },

    #[error("Error deleting {}: {source}", .path.display())]
    SanitizeFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Unable to create a unique directory name for '{base}' in {} after {attempts} attempts.",
        .parent.display()
    )]
    NameExhausted {
        base: String,
        parent: PathBuf,
        attempts: u32,
    },

    #[error("'{command}' timed out after {after:?}")]
    Timeout { command: String, after: Duration },
}

impl HarvestError {
    /// Whether the error stops the whole manifest run rather than a single row
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            HarvestError::ManifestMissing(_) | HarvestError::ManifestHeader(_)
        )
    }
}
