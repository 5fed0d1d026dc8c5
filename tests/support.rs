//! Common test support utilities and fixtures
//!
//! Shared by the integration tests: a temporary workspace, a scripted git
//! client that fabricates clones on disk, and a CLI runner.

#![allow(dead_code)]

use harvest::commands::CommandContext;
use harvest::config::Config;
use harvest::error::HarvestError;
use harvest::git::GitClient;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use std::{fs, io};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A test workspace with temporary directory, config and manifest
pub struct Workspace {
    pub root: TempDir,
    pub config_path: PathBuf,
    pub manifest_path: PathBuf,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create a new temporary workspace
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let config_path = root.path().join("harvest.yaml");
        let manifest_path = root.path().join("repositories.csv");
        Self {
            root,
            config_path,
            manifest_path,
        }
    }

    /// Write configuration YAML to the workspace
    pub fn write_config(&self, yaml: &str) {
        fs::write(&self.config_path, yaml).expect("Failed to write config");
    }

    /// Write a manifest; `rows` are appended below the standard header
    pub fn write_manifest(&self, rows: &[&str]) {
        let mut content =
            String::from("repo_url|target_directory|depth|custom_patterns|is_active\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(&self.manifest_path, content).expect("Failed to write manifest");
    }

    /// Get the workspace root path
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Directory clones land in
    pub fn clones(&self) -> PathBuf {
        self.root.path().join("clones")
    }

    /// Get the config file path as string
    pub fn config_str(&self) -> &str {
        self.config_path.to_str().expect("Config path not UTF-8")
    }

    /// Config that clones into [`Workspace::clones`] and logs inside the workspace
    pub fn config(&self) -> Config {
        Config {
            clean_directory: self.clones().to_string_lossy().into_owned(),
            default_csv_file: self.manifest_path.to_string_lossy().into_owned(),
            log_file: self.path().join("harvest.log").to_string_lossy().into_owned(),
            ..Config::default()
        }
    }
}

/// What [`FakeGit`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Clone {
        url: String,
        target: PathBuf,
        depth: u32,
    },
    RemoveRemote(PathBuf),
}

/// Git client that writes a small working tree instead of cloning
///
/// Every clone contains `.git/`, `README.md`, `main.py`, `notes.txt` and
/// `build.log`. URLs registered with [`FakeGit::failing`] fail like a
/// missing remote repository would; URLs registered with
/// [`FakeGit::timing_out`] write the tree and then report a timeout, like a
/// clone killed halfway.
#[derive(Default)]
pub struct FakeGit {
    failing: HashSet<String>,
    timing_out: HashSet<String>,
    calls: Mutex<Vec<GitCall>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn timing_out(mut self, url: &str) -> Self {
        self.timing_out.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cloned_targets(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitCall::Clone { target, .. } => Some(target),
                GitCall::RemoveRemote(_) => None,
            })
            .collect()
    }
}

impl GitClient for FakeGit {
    fn clone_repo(&self, url: &str, target: &Path, depth: u32) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(GitCall::Clone {
            url: url.to_string(),
            target: target.to_path_buf(),
            depth,
        });

        if self.failing.contains(url) {
            return Err(HarvestError::CloneFailure {
                url: url.to_string(),
                message: "exit code 128 (fatal git error): repository not found".to_string(),
            }
            .into());
        }

        write_working_tree(target)?;

        if self.timing_out.contains(url) {
            return Err(HarvestError::Timeout {
                command: format!("git clone {url}"),
                after: Duration::from_millis(500),
            }
            .into());
        }
        Ok(())
    }

    fn has_remote(&self, dir: &Path, _name: &str) -> anyhow::Result<bool> {
        Ok(dir.join(".git").exists())
    }

    fn remove_remote(&self, dir: &Path, _name: &str) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GitCall::RemoveRemote(dir.to_path_buf()));
        Ok(())
    }
}

pub fn write_working_tree(target: &Path) -> io::Result<()> {
    fs::create_dir_all(target.join(".git").join("objects"))?;
    fs::write(target.join(".git").join("HEAD"), "ref: refs/heads/main\n")?;
    fs::write(target.join("README.md"), "# Fixture\n")?;
    fs::write(target.join("main.py"), "print('hi')\n")?;
    fs::write(target.join("notes.txt"), "notes\n")?;
    fs::write(target.join("build.log"), "ok\n")?;
    Ok(())
}

/// Command context backed by `git`
pub fn create_test_context(config: Config, git: Arc<dyn GitClient>) -> CommandContext {
    CommandContext::new(config, git)
}

/// Every path under `root` with its file contents (empty for directories)
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| {
            let content = if entry.file_type().is_file() {
                fs::read(entry.path()).unwrap_or_default()
            } else {
                Vec::new()
            };
            (entry.path().to_path_buf(), content)
        })
        .collect()
}

/// Sorted names of the direct children of `dir`
pub fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Run the harvest binary with given arguments
pub fn run_cli(args: &[&str], cwd: Option<&Path>) -> CliOutput {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_harvest"));
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().expect("Failed to execute harvest");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Initialize a git repository with one commit and an `origin` remote
pub fn init_git_repo(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;

    Command::new("git").arg("init").current_dir(path).output()?;
    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(path)
        .output()?;
    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(path)
        .output()?;

    fs::write(path.join("README.md"), "# Test Repository")?;
    Command::new("git")
        .args(["add", "."])
        .current_dir(path)
        .output()?;
    Command::new("git")
        .args(["commit", "-m", "Initial commit"])
        .current_dir(path)
        .output()?;
    Command::new("git")
        .args(["remote", "add", "origin", "https://example.com/test/repo.git"])
        .current_dir(path)
        .output()?;

    Ok(())
}

/// Whether a `git` binary is available to run real-git tests
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
