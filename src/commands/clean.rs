//! Clean command implementation

use super::{Command, CommandContext};
use crate::sanitize::{CleanupOption, cleanup_patterns, perform_cleanup};
use crate::summary::RunSummary;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use std::path::PathBuf;

/// Delete everything in a directory that the selected options do not keep
pub struct CleanCommand {
    pub directory: PathBuf,
    pub options: Vec<CleanupOption>,
    /// Replaces the configured default patterns for the `custom` option
    pub patterns: Option<Vec<String>>,
}

#[async_trait]
impl Command for CleanCommand {
    async fn execute(&self, context: &CommandContext, summary: &mut RunSummary) -> Result<()> {
        let custom = self
            .patterns
            .clone()
            .unwrap_or_else(|| context.config.default_patterns.clone());
        let keep = cleanup_patterns(&self.options, &custom);

        if keep.is_empty() {
            println!(
                "{}",
                "No cleanup patterns selected, nothing to do".yellow()
            );
            return Ok(());
        }

        println!(
            "{}",
            format!(
                "Cleaning {} (keeping {}){}",
                self.directory.display(),
                keep.join(", "),
                if context.dry_run { " (dry run)" } else { "" }
            )
            .green()
        );

        let directory = self.directory.clone();
        let options = self.options.clone();
        let dry_run = context.dry_run;
        let report = tokio::task::spawn_blocking(move || {
            perform_cleanup(&directory, &options, &custom, dry_run)
        })
        .await?;

        if let Some(report) = report {
            for path in &report.planned {
                println!("{} {}", "[DRY RUN] Would delete:".yellow(), path.display());
            }
            for error in &report.errors {
                eprintln!("{}", error.red());
            }
            summary.absorb_sanitize(&report);
        }

        Ok(())
    }
}
