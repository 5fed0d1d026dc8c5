//! Configuration file loading and saving

use super::validation;
use crate::constants::config as defaults;
use crate::error::HarvestError;
use crate::sanitize::MatchPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Severity threshold for the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Unknown names fall back to `info`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warning" | "warn" => LogLevel::Warning,
            "error" => LogLevel::Error,
            "critical" => LogLevel::Critical,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    /// Equivalent tracing level; `critical` has no own level and maps to error
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Critical => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(LogLevel::parse_lenient(&value))
    }
}

/// How the pattern list handed to pruning is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneMode {
    /// Patterns name what survives; everything else is deleted
    #[default]
    Keep,
    /// Patterns name what is deleted
    Delete,
}

impl PruneMode {
    pub fn policy(self) -> MatchPolicy {
        match self {
            PruneMode::Keep => MatchPolicy::DeleteUnmatched,
            PruneMode::Delete => MatchPolicy::DeleteMatched,
        }
    }
}

impl std::str::FromStr for PruneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(PruneMode::Keep),
            "delete" => Ok(PruneMode::Delete),
            other => Err(format!("unknown prune mode '{other}' (expected keep or delete)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest used when none is given
    pub default_csv_file: String,
    /// Parent directory for clones of rows without a target directory
    pub clean_directory: String,
    /// Keep-list applied to rows without custom patterns
    pub default_patterns: Vec<String>,
    pub log_level: LogLevel,
    /// Upper bound on concurrent clones in parallel mode
    pub max_workers: usize,
    /// Shell command run after each clone; `{target}` is replaced with the clone path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_cloning_command: Option<String>,
    pub prune_mode: PruneMode,
    /// Kill git and hook processes that run longer than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_csv_file: defaults::DEFAULT_MANIFEST_FILE.to_string(),
            clean_directory: defaults::DEFAULT_CLEAN_DIRECTORY.to_string(),
            default_patterns: defaults::DEFAULT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            log_level: LogLevel::default(),
            max_workers: defaults::DEFAULT_MAX_WORKERS,
            post_cloning_command: None,
            prune_mode: PruneMode::default(),
            command_timeout_secs: None,
            log_file: defaults::DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration holding the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML (or JSON) file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{}'", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file '{}'", path.display()))?;

        validation::validate_config(&config).map_err(validation::validation_errors_to_anyhow)?;

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to the defaults
    ///
    /// The second element carries the [`HarvestError::ConfigMissing`] warning
    /// so the caller can log it once logging is set up.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<(Self, Option<HarvestError>)> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok((
                Self::default(),
                Some(HarvestError::ConfigMissing(path.to_path_buf())),
            ));
        }
        Ok((Self::load(path)?, None))
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), format!("---\n{yaml}"))?;
        Ok(())
    }

    pub fn clean_directory(&self) -> PathBuf {
        PathBuf::from(&self.clean_directory)
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}
