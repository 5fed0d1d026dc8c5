//! A single manifest record

use crate::constants::git::DEFAULT_DEPTH;
use crate::sanitize::PatternSet;
use crate::utils::naming::repo_base_name;
use std::path::{Path, PathBuf};

/// One repository to clone, with its per-row options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    /// 1-based line in the manifest file
    pub line: usize,
    pub repo_url: String,
    /// Parent directory for the clone; `None` means the configured clean directory
    pub target_directory: Option<String>,
    pub depth: u32,
    /// Replaces the configured default patterns when present
    pub custom_patterns: Option<Vec<String>>,
    pub is_active: bool,
}

impl ManifestRow {
    pub fn new(line: usize, repo_url: impl Into<String>) -> Self {
        Self {
            line,
            repo_url: repo_url.into(),
            target_directory: None,
            depth: DEFAULT_DEPTH,
            custom_patterns: None,
            is_active: true,
        }
    }

    /// Short name used to label console output and to name the clone
    pub fn label(&self) -> String {
        self.base_name()
            .unwrap_or_else(|| format!("line {}", self.line))
    }

    pub fn base_name(&self) -> Option<String> {
        repo_base_name(&self.repo_url)
    }

    /// Directory the unique clone name is allocated in
    pub fn target_parent(&self, clean_directory: &Path) -> PathBuf {
        match &self.target_directory {
            Some(dir) => PathBuf::from(dir),
            None => clean_directory.to_path_buf(),
        }
    }

    /// Row patterns if given, otherwise `defaults`
    pub fn effective_patterns(&self, defaults: &[String]) -> PatternSet {
        match &self.custom_patterns {
            Some(patterns) => PatternSet::new(patterns),
            None => PatternSet::new(defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_defaults() {
        let row = ManifestRow::new(2, "https://github.com/owner/tool.git");
        assert_eq!(row.depth, 1);
        assert!(row.is_active);
        assert_eq!(row.label(), "tool");
        assert_eq!(row.target_parent(Path::new("/clones")), PathBuf::from("/clones"));
    }

    #[test]
    fn test_label_falls_back_to_line() {
        let row = ManifestRow::new(7, "https://");
        assert_eq!(row.label(), "line 7");
    }

    #[test]
    fn test_custom_patterns_override_defaults() {
        let defaults = vec!["*.md".to_string()];
        let mut row = ManifestRow::new(2, "https://github.com/owner/tool.git");
        assert!(row.effective_patterns(&defaults).matches("README.md"));

        row.custom_patterns = Some(vec!["*.rs".to_string()]);
        let patterns = row.effective_patterns(&defaults);
        assert!(patterns.matches("lib.rs"));
        assert!(!patterns.matches("README.md"));
    }
}
