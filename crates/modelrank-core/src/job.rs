//! Job definitions and the ordered job registry.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::{ModelRankError, Result};

/// A named external command whose output is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Human-readable label, used as the key in results.
    pub name: String,

    /// Shell command line, passed to the runner verbatim.
    pub command: String,
}

impl Job {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

/// Ordered, validated set of jobs.
///
/// Registration order is the run order and the tie-break order in the
/// report. Names are unique so every job maps to exactly one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRegistry {
    jobs: Vec<Job>,
}

impl JobRegistry {
    /// Build a registry, rejecting empty lists, blank commands and
    /// duplicate names.
    pub fn new(jobs: Vec<Job>) -> Result<Self> {
        if jobs.is_empty() {
            return Err(ModelRankError::EmptyRegistry);
        }

        let mut seen = HashSet::new();
        for job in &jobs {
            if job.name.trim().is_empty() {
                return Err(ModelRankError::InvalidConfig(
                    "job name must not be empty".to_string(),
                ));
            }
            if job.command.trim().is_empty() {
                return Err(ModelRankError::EmptyCommand(job.name.clone()));
            }
            if !seen.insert(job.name.as_str()) {
                return Err(ModelRankError::DuplicateJob(job.name.clone()));
            }
        }

        Ok(Self { jobs })
    }

    /// The five sentiment models of the tweet comparison run.
    pub fn builtin() -> Self {
        Self {
            jobs: builtin_jobs(),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// SHA-256 over the ordered `(name, command)` pairs.
    ///
    /// Identical registries always share a digest; reordering changes it.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for job in &self.jobs {
            hasher.update(job.name.as_bytes());
            hasher.update(b"\0");
            hasher.update(job.command.as_bytes());
            hasher.update(b"\0");
        }
        hex::encode(hasher.finalize())
    }
}

pub(crate) fn builtin_jobs() -> Vec<Job> {
    vec![
        Job::new("Baseline", "python code/baseline.py"),
        Job::new("Naive Bayes", "python code/naivebayes.py"),
        Job::new("SVM", "python code/svm.py"),
        Job::new("Random Forest", "python code/randomforest.py"),
        Job::new("Decision Tree", "python code/decisiontree.py"),
    ]
}
