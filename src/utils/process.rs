//! Blocking child-process execution with an optional timeout

use crate::error::HarvestError;
use anyhow::{Context, Result};
use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of a finished child process
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }

    /// `exit code N (description): stderr`, for error messages
    pub fn failure_summary(&self) -> String {
        let code = self.exit_code();
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!(
                "exit code {} ({})",
                code,
                describe_exit_code(code)
            )
        } else {
            format!(
                "exit code {} ({}): {}",
                code,
                describe_exit_code(code),
                stderr
            )
        }
    }
}

/// Run `command` to completion, capturing stdout and stderr
///
/// With a timeout the child is killed once it expires and a
/// [`HarvestError::Timeout`] is returned.
pub fn run(command: &mut Command, timeout: Option<Duration>) -> Result<ProcessOutput> {
    let label = describe(command);
    let Some(timeout) = timeout else {
        let output = command
            .output()
            .with_context(|| format!("Failed to execute '{label}'"))?;
        return Ok(ProcessOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    };

    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to execute '{label}'"))?;

    // Both pipes are drained while polling
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            tracing::warn!("Killed '{}' after {:?}", label, timeout);
            return Err(HarvestError::Timeout {
                command: label,
                after: timeout,
            }
            .into());
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    Ok(ProcessOutput {
        status,
        stdout: join_reader(stdout_reader),
        stderr: join_reader(stderr_reader),
    })
}

/// Human-readable meaning of a shell or git exit code
pub fn describe_exit_code(exit_code: i32) -> &'static str {
    match exit_code {
        0 => "success",
        1 => "general error",
        2 => "shell builtin misuse",
        126 => "command invoked cannot execute",
        127 => "command not found",
        // git reports every fatal condition with 128
        128 => "fatal git error",
        130 => "interrupted",
        131..=255 => "terminated by signal",
        _ => "error",
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<std::thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program().to_string_lossy().into_owned())
        .chain(
            command
                .get_args()
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join(" ")
}
