//! Configuration validation
//!
//! Loading fails on a configuration that parses but cannot drive a run.

use super::Config;
use crate::constants::hook::TARGET_PLACEHOLDER;
use anyhow::anyhow;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `max_workers` is zero
    ZeroWorkers,
    /// `clean_directory` is empty or whitespace-only
    EmptyCleanDirectory,
    /// `default_csv_file` is empty or whitespace-only
    EmptyManifestPath,
    /// `post_cloning_command` is present but blank
    BlankHookCommand,
    /// `command_timeout_secs` is zero
    ZeroTimeout,
    /// A default pattern is empty or whitespace-only
    EmptyPattern(usize),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroWorkers => write!(f, "max_workers must be at least 1"),
            ValidationError::EmptyCleanDirectory => write!(f, "clean_directory cannot be empty"),
            ValidationError::EmptyManifestPath => write!(f, "default_csv_file cannot be empty"),
            ValidationError::BlankHookCommand => {
                write!(f, "post_cloning_command cannot be blank; remove the key instead")
            }
            ValidationError::ZeroTimeout => write!(f, "command_timeout_secs must be at least 1"),
            ValidationError::EmptyPattern(index) => {
                write!(f, "default_patterns[{}] cannot be empty", index)
            }
        }
    }
}

pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.max_workers == 0 {
        errors.push(ValidationError::ZeroWorkers);
    }
    if config.clean_directory.trim().is_empty() {
        errors.push(ValidationError::EmptyCleanDirectory);
    }
    if config.default_csv_file.trim().is_empty() {
        errors.push(ValidationError::EmptyManifestPath);
    }
    if let Some(command) = &config.post_cloning_command {
        if command.trim().is_empty() {
            errors.push(ValidationError::BlankHookCommand);
        } else if !command.contains(TARGET_PLACEHOLDER) {
            tracing::debug!("post_cloning_command has no {TARGET_PLACEHOLDER} placeholder");
        }
    }
    if config.command_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }
    for (index, pattern) in config.default_patterns.iter().enumerate() {
        if pattern.trim().is_empty() {
            errors.push(ValidationError::EmptyPattern(index));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Convert validation errors to anyhow::Error
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!("Invalid configuration: {}", error_messages.join("; "))
}
