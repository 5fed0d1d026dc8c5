//! Harvest - clone repositories from a manifest and strip them down to plain source trees

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod hook;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod sanitize;
pub mod summary;
pub mod ui;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::Config;
pub use error::HarvestError;
pub use orchestrator::CloneOrchestrator;
pub use summary::RunSummary;

/// Load the default config file, falling back to defaults when it is absent
pub fn load_default_config() -> anyhow::Result<Config> {
    Config::load_or_default(constants::config::DEFAULT_CONFIG_FILE).map(|(config, _)| config)
}
