//! Git client seam
//!
//! Everything the pipeline asks of git goes through [`GitClient`], so the
//! orchestrator and the stripper can be driven by a scripted client in tests.
//! [`SystemGit`] shells out to the `git` binary.

use crate::constants::git::GIT_BINARY;
use crate::error::HarvestError;
use crate::utils::process;
use anyhow::Result;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

pub trait GitClient: Send + Sync {
    /// `git clone --depth <depth> --recurse-submodules <url> <target>`
    fn clone_repo(&self, url: &str, target: &Path, depth: u32) -> Result<()>;

    /// Whether the repository at `dir` has a remote called `name`
    fn has_remote(&self, dir: &Path, name: &str) -> Result<bool>;

    fn remove_remote(&self, dir: &Path, name: &str) -> Result<()>;
}

/// [`GitClient`] backed by the system `git` binary
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    timeout: Option<Duration>,
}

impl SystemGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any git invocation that runs longer than `timeout`
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn git(&self, dir: Option<&Path>) -> Command {
        let mut command = Command::new(GIT_BINARY);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        // Never block on a credential prompt in a batch run
        command.env("GIT_TERMINAL_PROMPT", "0");
        command
    }
}

impl GitClient for SystemGit {
    fn clone_repo(&self, url: &str, target: &Path, depth: u32) -> Result<()> {
        let mut command = self.git(None);
        command
            .arg("clone")
            .arg("--depth")
            .arg(depth.to_string())
            .arg("--recurse-submodules")
            .arg(url)
            .arg(target);

        let output = process::run(&mut command, self.timeout)?;
        if !output.success() {
            return Err(HarvestError::CloneFailure {
                url: url.to_string(),
                message: output.failure_summary(),
            }
            .into());
        }
        Ok(())
    }

    fn has_remote(&self, dir: &Path, name: &str) -> Result<bool> {
        let mut command = self.git(Some(dir));
        command.args(["remote", "get-url", name]);
        let output = process::run(&mut command, self.timeout)?;
        Ok(output.success())
    }

    fn remove_remote(&self, dir: &Path, name: &str) -> Result<()> {
        let mut command = self.git(Some(dir));
        command.args(["remote", "remove", name]);
        let output = process::run(&mut command, self.timeout)?;
        if !output.success() {
            anyhow::bail!(
                "Failed to remove remote '{}' in {}: {}",
                name,
                dir.display(),
                output.failure_summary()
            );
        }
        Ok(())
    }
}
