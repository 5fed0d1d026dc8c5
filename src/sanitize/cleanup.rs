//! Cleanup option sets for the `clean` operation
//!
//! Each option contributes patterns to a keep-list; everything in the
//! target directory that matches none of them is deleted.

use super::matcher::PatternSet;
use super::sanitizer::{MatchPolicy, SanitizeReport, sanitize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOption {
    /// Keep `*.log`
    Logs,
    /// Keep editor backups (`*~`)
    Temp,
    /// Keep the default (or overridden) pattern list
    Custom,
    /// Contributes nothing
    None,
}

impl CleanupOption {
    pub fn patterns(self, custom: &[String]) -> Vec<String> {
        match self {
            CleanupOption::Logs => vec!["*.log".to_string()],
            CleanupOption::Temp => vec!["*~".to_string()],
            CleanupOption::Custom => custom.to_vec(),
            CleanupOption::None => Vec::new(),
        }
    }

    /// Parse a comma-separated option list; an empty list means `custom`
    pub fn parse_list(input: &str) -> Result<Vec<Self>, String> {
        let options = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if options.is_empty() {
            Ok(vec![CleanupOption::Custom])
        } else {
            Ok(options)
        }
    }
}

impl FromStr for CleanupOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logs" => Ok(CleanupOption::Logs),
            "temp" => Ok(CleanupOption::Temp),
            "custom" => Ok(CleanupOption::Custom),
            "none" => Ok(CleanupOption::None),
            other => Err(format!(
                "unknown cleanup option '{other}' (expected logs, temp, custom or none)"
            )),
        }
    }
}

impl fmt::Display for CleanupOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CleanupOption::Logs => "logs",
            CleanupOption::Temp => "temp",
            CleanupOption::Custom => "custom",
            CleanupOption::None => "none",
        };
        f.write_str(name)
    }
}

/// Build the keep-list for a set of options
pub fn cleanup_patterns(options: &[CleanupOption], custom: &[String]) -> Vec<String> {
    let mut patterns: Vec<String> = Vec::new();
    for option in options {
        for pattern in option.patterns(custom) {
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
    }
    patterns
}

/// Delete everything in `dir` not kept by `options`
///
/// Returns `None` when the options contribute no pattern at all, in which
/// case nothing is touched.
pub fn perform_cleanup(
    dir: &Path,
    options: &[CleanupOption],
    custom: &[String],
    dry_run: bool,
) -> Option<SanitizeReport> {
    let patterns = cleanup_patterns(options, custom);
    if patterns.is_empty() {
        tracing::info!("No cleanup patterns selected for {}", dir.display());
        return None;
    }

    Some(sanitize(
        dir,
        &PatternSet::new(&patterns),
        MatchPolicy::DeleteUnmatched,
        dry_run,
    ))
}
