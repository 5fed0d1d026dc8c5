//! Command argument validation utilities
//!
//! Checks that run after clap parsing and before any filesystem work.

use anyhow::{Result, anyhow};
use std::path::Path;

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Empty collection when at least one item is required
    EmptyCollection { argument: String },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::EmptyCollection { argument } => {
                write!(f, "{} cannot be empty", argument)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

/// Validate the clean target directory
///
/// A missing directory is allowed (the sanitizer logs and skips it), but an
/// existing path must be a directory.
pub fn validate_clean_directory(directory: &Path) -> Result<()> {
    if directory.as_os_str().is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "directory".to_string(),
                value: String::new(),
                reason: "directory cannot be empty".to_string(),
            },
        ));
    }
    if directory.exists() && !directory.is_dir() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "directory".to_string(),
                value: directory.display().to_string(),
                reason: "path is not a directory".to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate a `--patterns` override
///
/// When given, it must name at least one pattern.
pub fn validate_pattern_override(patterns: &Option<Vec<String>>) -> Result<()> {
    if let Some(list) = patterns
        && list.iter().all(|p| p.trim().is_empty())
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::EmptyCollection {
                argument: "--patterns".to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate a `--manifest` path
pub fn validate_manifest_path(manifest: &Option<std::path::PathBuf>) -> Result<()> {
    if let Some(path) = manifest
        && path.is_dir()
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "--manifest".to_string(),
                value: path.display().to_string(),
                reason: "manifest must be a file, not a directory".to_string(),
            },
        ));
    }
    Ok(())
}
