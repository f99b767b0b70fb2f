//! Execution results, classified outcomes and the ordered result set.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exit status recorded when a command could not be started at all.
pub const LAUNCH_FAILURE_STATUS: i32 = -1;

/// Raw capture of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: i32,
}

impl ExecutionResult {
    /// Result for a command that never ran; the launch error becomes stderr.
    pub fn launch_failure(error: impl std::fmt::Display) -> Self {
        Self {
            stdout: String::new(),
            stderr: error.to_string(),
            exit_status: LAUNCH_FAILURE_STATUS,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_status == 0
    }
}

/// Classified result of one job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum JobOutcome {
    /// Exited 0 and printed a parseable metric.
    Score(f64),
    /// Exited 0 but no metric could be parsed.
    Unavailable,
    /// Exited non-zero or could not be launched.
    Failed,
}

impl JobOutcome {
    pub fn score(&self) -> Option<f64> {
        match self {
            JobOutcome::Score(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, JobOutcome::Score(_))
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            JobOutcome::Score(_) => "score",
            JobOutcome::Unavailable => "unavailable",
            JobOutcome::Failed => "failed",
        }
    }
}

/// Everything the orchestrator knows about a finished job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub name: String,
    pub outcome: JobOutcome,
    pub exit_status: i32,
    pub elapsed: Duration,
    /// Captured stderr, kept only for failed jobs.
    pub diagnostic: Option<String>,
}

/// Job name to outcome, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, JobOutcome)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an outcome. A repeated name keeps its first position and
    /// takes the new outcome.
    pub fn insert(&mut self, name: impl Into<String>, outcome: JobOutcome) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = outcome,
            None => self.entries.push((name, outcome)),
        }
    }

    pub fn get(&self, name: &str) -> Option<JobOutcome> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| *outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, JobOutcome)> + '_ {
        self.entries.iter().map(|(n, o)| (n.as_str(), *o))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scored_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_scored()).count()
    }

    pub fn unavailable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, JobOutcome::Unavailable))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, JobOutcome::Failed))
            .count()
    }
}

impl FromIterator<(String, JobOutcome)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (String, JobOutcome)>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for (name, outcome) in iter {
            set.insert(name, outcome);
        }
        set
    }
}
