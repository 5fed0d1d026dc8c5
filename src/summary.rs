//! End-of-run accounting
//!
//! A [`RunSummary`] is created once per session and passed by `&mut` to every
//! operation that contributes to it. Parallel workers never touch it; their
//! [`RowOutcome`]s are merged afterwards.

use crate::orchestrator::RowOutcome;
use crate::sanitize::SanitizeReport;
use colored::*;
use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub total_cloned: usize,
    pub total_deleted: usize,
    /// Every non-fatal error, in the order it happened
    pub errors: Vec<String>,
    /// Actions skipped because of dry-run mode
    pub planned: Vec<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Fold in a sanitizer pass
    pub fn absorb_sanitize(&mut self, report: &SanitizeReport) {
        self.total_deleted += report.deleted_count();
        self.planned.extend(
            report
                .planned
                .iter()
                .map(|path| format!("Would delete: {}", path.display())),
        );
        self.errors.extend(report.errors.iter().cloned());
    }

    /// Fold in the result of one manifest row
    pub fn absorb_row(&mut self, outcome: RowOutcome) {
        if outcome.cloned {
            self.total_cloned += 1;
        }
        self.total_deleted += outcome.deleted;
        self.planned.extend(outcome.planned);
        self.errors.extend(outcome.errors);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Plain-text report, one line per entry
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "=== Summary Report ===".to_string(),
            format!("Total Repositories Cloned: {}", self.total_cloned),
            format!("Total Files/Folders Deleted: {}", self.total_deleted),
        ];
        if !self.planned.is_empty() {
            lines.push(format!("Dry-run Actions: {}", self.planned.len()));
        }
        lines.push(format!("Total Errors: {}", self.errors.len()));
        lines.extend(self.errors.iter().map(|e| format!("  - {e}")));
        lines
    }

    /// Print the report to stdout and the log
    pub fn report(&self) {
        for line in self.render() {
            if line.starts_with("  - ") {
                tracing::error!("{}", line.trim_start_matches("  - "));
                println!("{}", line.red());
            } else {
                tracing::info!("{line}");
                println!("{}", line);
            }
        }
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        println!("{}", format!("Generated at {timestamp}").dimmed());
    }
}
