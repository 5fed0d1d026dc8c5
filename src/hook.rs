//! Post-clone hook
//!
//! The configured command is opaque: the only processing is replacing every
//! `{target}` with the clone path before handing the string to `sh -c`. The
//! hook runs in the current working directory, so a relative `{target}`
//! still resolves.

use crate::constants::hook::{SHELL, TARGET_PLACEHOLDER};
use crate::error::HarvestError;
use crate::utils::process;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Substitute the target path into a hook template
pub fn expand(template: &str, target: &Path) -> String {
    template.replace(TARGET_PLACEHOLDER, &target.display().to_string())
}

/// Run the hook for `target`; a non-zero exit is a [`HarvestError::HookFailure`]
pub fn run_post_clone_hook(
    template: &str,
    target: &Path,
    timeout: Option<Duration>,
) -> Result<(), HarvestError> {
    let command = expand(template, target);
    tracing::debug!("Running post-cloning hook: {command}");

    let failure = |message: String| HarvestError::HookFailure {
        target: target.to_path_buf(),
        message,
    };

    let output = process::run(Command::new(SHELL).arg("-c").arg(&command), timeout)
        .map_err(|e| failure(format!("{e:#}")))?;

    if !output.success() {
        return Err(failure(format!(
            "'{}' failed with {}",
            command,
            output.failure_summary()
        )));
    }

    tracing::info!("Post-cloning hook executed: {command}");
    Ok(())
}
