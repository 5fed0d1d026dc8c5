//! Console and log output for per-repository operations

use colored::*;

/// Logger for clone-pipeline steps with consistent formatting
///
/// Each console line is prefixed with the repository label in cyan/bold.
/// Every message is also emitted as a `tracing` event so it lands in the
/// log file.
///
/// ## Example
///
/// ```rust,no_run
/// use harvest::git::Logger;
///
/// let logger = Logger::default();
/// logger.info("tool", "Cloning from https://github.com/owner/tool.git");
/// logger.success("tool", "Successfully cloned");
/// ```
#[derive(Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn info(&self, label: &str, msg: &str) {
        tracing::info!(repo = label, "{msg}");
        println!("{} | {}", label.cyan().bold(), msg);
    }

    pub fn success(&self, label: &str, msg: &str) {
        tracing::info!(repo = label, "{msg}");
        println!("{} | {}", label.cyan().bold(), msg.green());
    }

    pub fn warn(&self, label: &str, msg: &str) {
        tracing::warn!(repo = label, "{msg}");
        println!("{} | {}", label.cyan().bold(), msg.yellow());
    }

    pub fn error(&self, label: &str, msg: &str) {
        tracing::error!(repo = label, "{msg}");
        eprintln!("{} | {}", label.cyan().bold(), msg.red());
    }
}
