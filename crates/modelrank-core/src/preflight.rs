//! Preconditions checked before a batch starts.
//!
//! The checks only produce warnings. The caller resolves the environment
//! value and the operator's decision; nothing here reads process state
//! except the artifact existence check.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Whether the expected execution environment is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnvironmentStatus {
    Active,
    Mismatch {
        expected: String,
        actual: Option<String>,
    },
    NotRequired,
}

impl EnvironmentStatus {
    /// Compare the active environment name against the expected one.
    pub fn resolve(expected: Option<&str>, actual: Option<&str>) -> Self {
        match expected {
            None => EnvironmentStatus::NotRequired,
            Some(expected) if actual == Some(expected) => EnvironmentStatus::Active,
            Some(expected) => EnvironmentStatus::Mismatch {
                expected: expected.to_string(),
                actual: actual.map(str::to_string),
            },
        }
    }
}

/// Return the artifacts under `root` that do not exist, in listed order.
pub fn check_artifacts(root: &Path, artifacts: &[PathBuf]) -> Vec<PathBuf> {
    artifacts
        .iter()
        .filter(|artifact| !root.join(artifact).exists())
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightDecision {
    Proceed,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreflightReport {
    pub environment: EnvironmentStatus,
    pub missing_artifacts: Vec<PathBuf>,
}

impl PreflightReport {
    pub fn new(environment: EnvironmentStatus, missing_artifacts: Vec<PathBuf>) -> Self {
        Self {
            environment,
            missing_artifacts,
        }
    }

    pub fn has_warnings(&self) -> bool {
        matches!(self.environment, EnvironmentStatus::Mismatch { .. })
            || !self.missing_artifacts.is_empty()
    }

    pub fn decide(&self, proceed_despite_warnings: bool) -> PreflightDecision {
        if !self.has_warnings() || proceed_despite_warnings {
            PreflightDecision::Proceed
        } else {
            PreflightDecision::Abort
        }
    }

    /// Operator-facing warning text, empty when there is nothing to report.
    pub fn warnings(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let EnvironmentStatus::Mismatch { expected, .. } = &self.environment {
            lines.push(format!(
                "WARNING: you do not appear to be in the '{}' environment.",
                expected
            ));
            lines.push(format!(
                "Run 'conda activate {}' before running this tool.",
                expected
            ));
        }

        if !self.missing_artifacts.is_empty() {
            lines.push("WARNING: the following preprocessed files are missing:".to_string());
            for artifact in &self.missing_artifacts {
                lines.push(format!("  - {}", artifact.display()));
            }
            lines.push(String::new());
            lines.push("You may need to run the preprocessing first:".to_string());
            lines.push("  python code/preprocess.py twitter_cleaned.csv".to_string());
            lines.push("  python code/stats.py twitter_cleaned-processed.csv".to_string());
        }

        lines
    }
}
