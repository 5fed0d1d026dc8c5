//! One-level directory pruning driven by a [`PatternSet`]

use super::matcher::PatternSet;
use crate::error::HarvestError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Which side of the match gets deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPolicy {
    /// Patterns are a delete-list
    DeleteMatched,
    /// Patterns are a keep-list
    DeleteUnmatched,
}

impl MatchPolicy {
    pub fn delete_matched(self) -> bool {
        self == MatchPolicy::DeleteMatched
    }

    /// `(matched AND delete_matched) OR (NOT matched AND NOT delete_matched)`
    pub fn should_delete(self, matched: bool) -> bool {
        matched == self.delete_matched()
    }
}

/// Outcome of a single [`sanitize`] pass
#[derive(Debug, Default, Serialize)]
pub struct SanitizeReport {
    /// Entries actually removed
    pub deleted: Vec<PathBuf>,
    /// Entries that would have been removed in dry-run mode
    pub planned: Vec<PathBuf>,
    /// One message per entry that could not be removed
    pub errors: Vec<String>,
}

impl SanitizeReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }
}

/// Delete the immediate children of `dir` selected by `patterns` and `policy`
///
/// Directories are removed with everything below them. A failure on one
/// child is recorded and the remaining children are still processed. A
/// missing `dir` is only a warning.
pub fn sanitize(
    dir: &Path,
    patterns: &PatternSet,
    policy: MatchPolicy,
    dry_run: bool,
) -> SanitizeReport {
    let mut report = SanitizeReport::default();

    if !dir.exists() {
        tracing::warn!("The directory '{}' does not exist.", dir.display());
        return report;
    }

    let mut entries = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    record_error(&mut report, dir.to_path_buf(), e);
                    None
                }
            })
            .collect::<Vec<_>>(),
        Err(e) => {
            record_error(&mut report, dir.to_path_buf(), e);
            return report;
        }
    };
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        let matched = patterns.matches(&name.to_string_lossy());

        if !policy.should_delete(matched) {
            tracing::info!("Kept: {}", path.display());
            continue;
        }

        if dry_run {
            tracing::info!("[DRY RUN] Would delete: {}", path.display());
            report.planned.push(path);
            continue;
        }

        match remove_entry(&path) {
            Ok(kind) => {
                tracing::info!("Deleted {}: {}", kind, path.display());
                report.deleted.push(path);
            }
            Err(e) => record_error(&mut report, path, e),
        }
    }

    report
}

fn record_error(report: &mut SanitizeReport, path: PathBuf, source: std::io::Error) {
    let error = HarvestError::SanitizeFailure { path, source };
    tracing::error!("{error}");
    report.errors.push(error.to_string());
}

/// Remove a file, symlink or directory tree; returns what kind of entry it was
fn remove_entry(path: &Path) -> std::io::Result<&'static str> {
    // symlink_metadata so a link to a directory is unlinked, not followed
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() {
        fs::remove_dir_all(path)?;
        Ok("directory")
    } else {
        fs::remove_file(path)?;
        Ok("file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate(dir: &Path) {
        fs::write(dir.join("a.py"), "print(1)").unwrap();
        fs::write(dir.join("b.txt"), "text").unwrap();
        fs::create_dir_all(dir.join(".git").join("objects")).unwrap();
        fs::write(dir.join(".git").join("HEAD"), "ref: refs/heads/main").unwrap();
    }

    #[test]
    fn test_policy_truth_table() {
        assert!(MatchPolicy::DeleteMatched.should_delete(true));
        assert!(!MatchPolicy::DeleteMatched.should_delete(false));
        assert!(MatchPolicy::DeleteUnmatched.should_delete(false));
        assert!(!MatchPolicy::DeleteUnmatched.should_delete(true));
        assert!(MatchPolicy::DeleteMatched.delete_matched());
        assert!(!MatchPolicy::DeleteUnmatched.delete_matched());
    }

    #[test]
    fn test_delete_matched() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let patterns = PatternSet::new(["*.py", ".git"]);

        let report = sanitize(temp.path(), &patterns, MatchPolicy::DeleteMatched, false);

        assert_eq!(report.deleted_count(), 2);
        assert!(report.errors.is_empty());
        assert!(!temp.path().join("a.py").exists());
        assert!(!temp.path().join(".git").exists());
        assert!(temp.path().join("b.txt").exists());
    }

    #[test]
    fn test_delete_unmatched() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let patterns = PatternSet::new(["*.py", ".git"]);

        let report = sanitize(temp.path(), &patterns, MatchPolicy::DeleteUnmatched, false);

        assert_eq!(report.deleted, vec![temp.path().join("b.txt")]);
        assert!(temp.path().join("a.py").exists());
        assert!(temp.path().join(".git").join("HEAD").exists());
    }

    #[test]
    fn test_dry_run_plans_without_deleting() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let patterns = PatternSet::new(["*.py", ".git"]);

        let report = sanitize(temp.path(), &patterns, MatchPolicy::DeleteMatched, true);

        assert!(report.deleted.is_empty());
        assert_eq!(
            report.planned,
            vec![temp.path().join(".git"), temp.path().join("a.py")]
        );
        assert!(temp.path().join("a.py").exists());
        assert!(temp.path().join(".git").exists());
    }

    #[test]
    fn test_missing_directory_is_noop() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let report = sanitize(
            &missing,
            &PatternSet::new(["*"]),
            MatchPolicy::DeleteMatched,
            false,
        );

        assert!(report.deleted.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_only_immediate_children_are_considered() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("keep.py"), "").unwrap();

        // "src" itself does not match, so the whole tree goes even though
        // the file inside would have matched
        let report = sanitize(
            temp.path(),
            &PatternSet::new(["*.py"]),
            MatchPolicy::DeleteUnmatched,
            false,
        );

        assert_eq!(report.deleted_count(), 1);
        assert!(!nested.exists());
    }

    #[test]
    fn test_empty_patterns_with_keep_list_delete_everything() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());

        let report = sanitize(
            temp.path(),
            &PatternSet::default(),
            MatchPolicy::DeleteUnmatched,
            false,
        );

        assert_eq!(report.deleted_count(), 3);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_unlinked_not_followed() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("precious.txt"), "keep me").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        let report = sanitize(
            temp.path(),
            &PatternSet::new(["link"]),
            MatchPolicy::DeleteMatched,
            false,
        );

        assert_eq!(report.deleted_count(), 1);
        assert!(!temp.path().join("link").exists());
        assert!(outside.path().join("precious.txt").exists());
    }
}
