//! Base types and traits for the command pattern

use crate::config::Config;
use crate::git::GitClient;
use crate::summary::RunSummary;
use anyhow::Result;
use std::sync::Arc;

/// Context passed to all commands containing shared configuration and options
#[derive(Clone)]
pub struct CommandContext {
    /// The loaded configuration
    pub config: Config,
    /// Git implementation used for clones and remote detachment
    pub git: Arc<dyn GitClient>,
    /// Report intended deletions and clones without performing them
    pub dry_run: bool,
    /// Whether to clone manifest rows in parallel
    pub parallel: bool,
}

impl CommandContext {
    pub fn new(config: Config, git: Arc<dyn GitClient>) -> Self {
        Self {
            config,
            git,
            dry_run: false,
            parallel: false,
        }
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command, adding its results to `summary`
    async fn execute(&self, context: &CommandContext, summary: &mut RunSummary) -> Result<()>;
}
