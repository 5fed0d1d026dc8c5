//! Manifest row builder utilities

use super::ManifestRow;

/// Builder for manifest rows created in code rather than read from a file
pub struct ManifestRowBuilder {
    row: ManifestRow,
}

impl ManifestRowBuilder {
    /// Create a new builder for an active row at manifest line `line`
    pub fn new(line: usize, repo_url: impl Into<String>) -> Self {
        Self {
            row: ManifestRow::new(line, repo_url),
        }
    }

    /// Set the parent directory for the clone
    pub fn with_target_directory(mut self, dir: impl Into<String>) -> Self {
        self.row.target_directory = Some(dir.into());
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.row.depth = depth;
        self
    }

    /// Replace the default patterns for this row
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.row.custom_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.row.is_active = false;
        self
    }

    /// Build the row
    pub fn build(self) -> ManifestRow {
        self.row
    }
}
