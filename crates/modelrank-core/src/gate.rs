//! Batch-level verdict.
//!
//! Job failures never stop a batch. Whether they should fail the process is
//! an operator choice: by default the run always passes, and with
//! `fail_on_error` any failed job fails it.

use serde::{Deserialize, Serialize};

use crate::outcome::{JobOutcome, ResultSet};

/// Verdict over a completed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub passed: bool,
    pub scored: usize,
    pub unavailable: usize,
    pub failed: usize,
    /// One entry per failed job when `fail_on_error` is set.
    pub violations: Vec<String>,
    pub message: String,
}

impl BatchVerdict {
    pub fn evaluate(results: &ResultSet, fail_on_error: bool) -> Self {
        let violations: Vec<String> = if fail_on_error {
            results
                .iter()
                .filter(|(_, outcome)| matches!(outcome, JobOutcome::Failed))
                .map(|(name, _)| format!("Model '{}' failed", name))
                .collect()
        } else {
            Vec::new()
        };

        let scored = results.scored_count();
        let unavailable = results.unavailable_count();
        let failed = results.failed_count();
        let passed = violations.is_empty();
        let message = if passed {
            format!(
                "{} scored, {} unavailable, {} failed",
                scored, unavailable, failed
            )
        } else {
            format!("Batch failed with {} failed model(s)", violations.len())
        };

        Self {
            passed,
            scored,
            unavailable,
            failed,
            violations,
            message,
        }
    }

    /// Process exit code for this verdict.
    pub fn exit_code(&self) -> u8 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> ResultSet {
        vec![
            ("A".to_string(), JobOutcome::Score(90.0)),
            ("B".to_string(), JobOutcome::Failed),
            ("C".to_string(), JobOutcome::Unavailable),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_failures_tolerated_by_default() {
        let verdict = BatchVerdict::evaluate(&mixed(), false);
        assert!(verdict.passed);
        assert_eq!(verdict.exit_code(), 0);
        assert_eq!(verdict.failed, 1);
        assert_eq!(verdict.message, "1 scored, 1 unavailable, 1 failed");
    }

    #[test]
    fn test_fail_on_error_rejects_failed_jobs() {
        let verdict = BatchVerdict::evaluate(&mixed(), true);
        assert!(!verdict.passed);
        assert_eq!(verdict.exit_code(), 1);
        assert_eq!(verdict.violations, vec!["Model 'B' failed".to_string()]);
    }

    #[test]
    fn test_unavailable_is_not_a_violation() {
        let set: ResultSet = vec![("C".to_string(), JobOutcome::Unavailable)]
            .into_iter()
            .collect();
        let verdict = BatchVerdict::evaluate(&set, true);
        assert!(verdict.passed);
    }

    #[test]
    fn test_empty_batch_passes() {
        assert!(BatchVerdict::evaluate(&ResultSet::new(), true).passed);
    }
}
