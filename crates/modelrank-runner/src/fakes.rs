//! In-memory runner for tests.

use async_trait::async_trait;
use modelrank_core::ExecutionResult;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::runner::CommandRunner;

/// Returns canned results keyed by command line and records every call.
///
/// Unknown commands behave like a launch failure.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, ExecutionResult>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        command: impl Into<String>,
        exit_status: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        self.scripts.insert(
            command.into(),
            ExecutionResult {
                stdout: stdout.into(),
                stderr: stderr.into(),
                exit_status,
            },
        );
        self
    }

    /// Commands run so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str) -> ExecutionResult {
        self.calls.lock().unwrap().push(command.to_string());
        self.scripts.get(command).cloned().unwrap_or_else(|| {
            ExecutionResult::launch_failure(format!("no script for command '{}'", command))
        })
    }
}
