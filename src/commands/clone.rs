//! Clone command implementation

use super::{Command, CommandContext};
use crate::manifest::read_manifest;
use crate::orchestrator::CloneOrchestrator;
use crate::summary::RunSummary;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use std::path::PathBuf;

/// Clone every active row of a manifest
pub struct CloneCommand {
    /// Manifest to read; the configured `default_csv_file` when `None`
    pub manifest: Option<PathBuf>,
}

impl CloneCommand {
    pub fn manifest_path(&self, context: &CommandContext) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| PathBuf::from(&context.config.default_csv_file))
    }
}

#[async_trait]
impl Command for CloneCommand {
    async fn execute(&self, context: &CommandContext, summary: &mut RunSummary) -> Result<()> {
        let path = self.manifest_path(context);
        let manifest = read_manifest(&path).inspect_err(|e| tracing::error!("{e}"))?;

        if manifest.is_empty() {
            println!(
                "{}",
                format!(
                    "No active repositories in {} ({} inactive skipped)",
                    path.display(),
                    manifest.skipped_inactive
                )
                .yellow()
            );
            return Ok(());
        }

        let mode = if context.dry_run { " (dry run)" } else { "" };
        println!(
            "{}",
            format!("Cloning {} repositories{}...", manifest.len(), mode).green()
        );

        let errors_before = summary.error_count();
        let cloned_before = summary.total_cloned;

        let orchestrator =
            CloneOrchestrator::new(context.config.clone(), context.git.clone()).dry_run(context.dry_run);
        orchestrator.run(manifest, summary, context.parallel).await;

        let new_errors = summary.error_count() - errors_before;
        if new_errors == 0 {
            println!("{}", "Done cloning repositories".green());
        } else {
            println!(
                "{}",
                format!(
                    "Completed with {} cloned, {} errors",
                    summary.total_cloned - cloned_before,
                    new_errors
                )
                .yellow()
            );
        }

        Ok(())
    }
}
