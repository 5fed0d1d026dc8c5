//! Per-row clone pipeline
//!
//! Each active manifest row moves through
//! `Pending → Cloning → Stripping → (PostHook) → Sanitizing → Done`.
//! `Failed` is terminal and only reachable before anything was cloned:
//! from `Pending` (unusable row, no free name) or from `Cloning`. Problems
//! after a successful clone are recorded but the row still completes.
//! Inactive rows end in `Skipped` without touching the filesystem.

use crate::config::Config;
use crate::error::HarvestError;
use crate::git::{GitClient, Logger, MetadataStripper};
use crate::hook;
use crate::manifest::{Manifest, ManifestEntry, ManifestRow};
use crate::sanitize::sanitize;
use crate::summary::RunSummary;
use crate::utils::naming::NameRegistry;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Pending,
    Cloning,
    Stripping,
    PostHook,
    Sanitizing,
    Done,
    Failed,
    Skipped,
}

/// Everything one row contributed to the run
#[derive(Debug)]
pub struct RowOutcome {
    pub line: usize,
    pub label: String,
    pub target: Option<PathBuf>,
    pub state: RowState,
    pub cloned: bool,
    pub deleted: usize,
    pub planned: Vec<String>,
    pub errors: Vec<String>,
}

impl RowOutcome {
    fn pending(row: &ManifestRow) -> Self {
        Self {
            line: row.line,
            label: row.label(),
            target: None,
            state: RowState::Pending,
            cloned: false,
            deleted: 0,
            planned: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Outcome for a manifest line that never became a row
    pub fn invalid(error: HarvestError) -> Self {
        let line = match &error {
            HarvestError::Manifest { line, .. } | HarvestError::InvalidDepth { line, .. } => *line,
            _ => 0,
        };
        Self {
            line,
            label: format!("line {line}"),
            target: None,
            state: RowState::Failed,
            cloned: false,
            deleted: 0,
            planned: Vec::new(),
            errors: vec![error.to_string()],
        }
    }

    fn fail(mut self, logger: &Logger, error: String) -> Self {
        logger.error(&self.label, &error);
        self.errors.push(error);
        self.state = RowState::Failed;
        self
    }

    fn advance(&mut self, state: RowState) {
        tracing::debug!(repo = %self.label, from = ?self.state, to = ?state, "row transition");
        self.state = state;
    }
}

/// Drives manifest rows through the clone pipeline
///
/// Cheap to clone; all shared state lives behind `Arc`s so rows can be
/// handed to worker threads.
#[derive(Clone)]
pub struct CloneOrchestrator {
    config: Arc<Config>,
    git: Arc<dyn GitClient>,
    registry: Arc<NameRegistry>,
    dry_run: bool,
    logger: Logger,
}

impl CloneOrchestrator {
    pub fn new(config: Config, git: Arc<dyn GitClient>) -> Self {
        Self {
            config: Arc::new(config),
            git,
            registry: Arc::new(NameRegistry::new()),
            dry_run: false,
            logger: Logger,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one row to completion
    pub fn process_row(&self, row: &ManifestRow) -> RowOutcome {
        let mut outcome = RowOutcome::pending(row);

        if !row.is_active {
            tracing::debug!(repo = %outcome.label, "Skipping inactive row {}", row.line);
            outcome.advance(RowState::Skipped);
            return outcome;
        }

        let Some(base_name) = row.base_name() else {
            let error = HarvestError::Manifest {
                line: row.line,
                message: format!("cannot derive a directory name from '{}'", row.repo_url),
            };
            return outcome.fail(&self.logger, error.to_string());
        };

        let parent = row.target_parent(&self.config.clean_directory());
        let target = match self.registry.claim(&base_name, &parent) {
            Ok(target) => target,
            Err(e) => return outcome.fail(&self.logger, e.to_string()),
        };
        outcome.target = Some(target.clone());

        if self.dry_run {
            let plan = format!(
                "[DRY RUN] Would clone from {} to {} with depth {}",
                row.repo_url,
                target.display(),
                row.depth
            );
            self.logger.info(&outcome.label, &plan);
            outcome.planned.push(plan);
            outcome.advance(RowState::Done);
            return outcome;
        }

        outcome.advance(RowState::Cloning);
        self.logger.info(
            &outcome.label,
            &format!(
                "Cloning {} into {} (depth {})",
                row.repo_url,
                target.display(),
                row.depth
            ),
        );
        let preexisting = target.exists();
        if let Err(e) = self.git.clone_repo(&row.repo_url, &target, row.depth) {
            let error = match e.downcast::<HarvestError>() {
                Ok(clone_error @ HarvestError::CloneFailure { .. }) => clone_error.to_string(),
                Ok(other) => format!("Error cloning {}: {}", row.repo_url, other),
                Err(e) => format!("Error cloning {}: {:#}", row.repo_url, e),
            };
            if !preexisting {
                self.discard_partial_clone(&mut outcome, &target);
            }
            return outcome.fail(&self.logger, error);
        }
        outcome.cloned = true;
        self.logger.success(&outcome.label, "Successfully cloned");

        outcome.advance(RowState::Stripping);
        let strip = MetadataStripper::new(self.git.as_ref()).strip(&target);
        for error in strip.errors {
            self.logger.warn(&outcome.label, &error);
            outcome.errors.push(error);
        }

        if let Some(template) = &self.config.post_cloning_command {
            outcome.advance(RowState::PostHook);
            if let Err(e) =
                hook::run_post_clone_hook(template, &target, self.config.command_timeout())
            {
                self.logger.warn(&outcome.label, &e.to_string());
                outcome.errors.push(e.to_string());
            }
        }

        outcome.advance(RowState::Sanitizing);
        let patterns = row.effective_patterns(&self.config.default_patterns);
        let report = sanitize(&target, &patterns, self.config.prune_mode.policy(), false);
        outcome.deleted = report.deleted_count();
        outcome.errors.extend(report.errors);

        outcome.advance(RowState::Done);
        self.logger.success(
            &outcome.label,
            &format!("Done ({} entries pruned)", outcome.deleted),
        );
        outcome
    }

    /// Remove whatever a failed or killed clone left at `target`
    fn discard_partial_clone(&self, outcome: &mut RowOutcome, target: &Path) {
        if fs::symlink_metadata(target).is_err() {
            return;
        }
        match fs::remove_dir_all(target) {
            Ok(()) => tracing::info!(
                repo = %outcome.label,
                "Removed partial clone at {}",
                target.display()
            ),
            Err(e) => {
                let error = format!(
                    "Error removing partial clone at {}: {}",
                    target.display(),
                    e
                );
                self.logger.warn(&outcome.label, &error);
                outcome.errors.push(error);
            }
        }
    }

    /// Process every entry of `manifest`, merging outcomes into `summary`
    ///
    /// Rows run one after another unless `parallel` is set, in which case at
    /// most `max_workers` clones run at once. Either way outcomes are merged
    /// in manifest order.
    pub async fn run(&self, manifest: Manifest, summary: &mut RunSummary, parallel: bool) {
        if parallel {
            self.run_parallel(manifest.entries, summary).await;
        } else {
            self.run_sequential(manifest.entries, summary).await;
        }
    }

    async fn run_sequential(&self, entries: Vec<ManifestEntry>, summary: &mut RunSummary) {
        for entry in entries {
            match self.spawn_entry(entry).await {
                Ok(outcome) => summary.absorb_row(outcome),
                Err(e) => summary.record_error(format!("Task error: {e:#}")),
            }
        }
    }

    async fn run_parallel(&self, entries: Vec<ManifestEntry>, summary: &mut RunSummary) {
        let semaphore = Arc::new(Semaphore::new(self.config.max_workers.max(1)));

        let tasks: Vec<_> = entries
            .into_iter()
            .map(|entry| {
                let orchestrator = self.clone();
                let semaphore = semaphore.clone();
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await?;
                    orchestrator.spawn_entry(entry).await
                })
            })
            .collect();

        for task in futures::future::join_all(tasks).await {
            match task {
                Ok(Ok(outcome)) => summary.absorb_row(outcome),
                Ok(Err(e)) => summary.record_error(format!("Task error: {e:#}")),
                Err(e) => summary.record_error(format!("Task error: {e}")),
            }
        }
    }

    /// Run one entry on the blocking pool
    async fn spawn_entry(&self, entry: ManifestEntry) -> Result<RowOutcome> {
        let row = match entry {
            Ok(row) => row,
            Err(e) => {
                let outcome = RowOutcome::invalid(e);
                self.logger.error(&outcome.label, &outcome.errors[0]);
                return Ok(outcome);
            }
        };
        let orchestrator = self.clone();
        Ok(tokio::task::spawn_blocking(move || orchestrator.process_row(&row)).await?)
    }
}
