//! Command execution.

use async_trait::async_trait;
use modelrank_core::ExecutionResult;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// Runs one command line to completion and captures its output.
///
/// Implementations never fail: a command that cannot be started is reported
/// as an [`ExecutionResult`] with a non-zero status and the cause in stderr.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> ExecutionResult;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    async fn run(&self, command: &str) -> ExecutionResult {
        (**self).run(command).await
    }
}

/// Runs commands through the platform shell with stdin closed.
///
/// There is no timeout: a job that never exits blocks the batch.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    shell_arg: String,
    working_dir: Option<PathBuf>,
}

impl Default for ShellRunner {
    fn default() -> Self {
        if cfg!(windows) {
            Self::with_shell("cmd", "/C")
        } else {
            Self::with_shell("sh", "-c")
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific shell program and its "run this string" flag.
    pub fn with_shell(shell: impl Into<String>, shell_arg: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            shell_arg: shell_arg.into(),
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> ExecutionResult {
        let mut cmd = Command::new(&self.shell);
        cmd.arg(&self.shell_arg)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        match cmd.output().await {
            Ok(output) => ExecutionResult {
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                exit_status: exit_status_code(output.status),
            },
            Err(e) => {
                debug!(shell = %self.shell, error = %e, "Failed to launch command");
                ExecutionResult::launch_failure(format!(
                    "failed to launch '{}': {}",
                    command, e
                ))
            }
        }
    }
}

/// Exit code, or 128 + signal for a child killed by a signal.
fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    modelrank_core::LAUNCH_FAILURE_STATUS
}
