//! Batch configuration, loaded from TOML.
//!
//! ```toml
//! expected_env = "twitter-sentiment"
//! required_artifacts = ["twitter_cleaned-processed.csv"]
//! fail_on_error = true
//!
//! [metric]
//! keyword = "Correct"
//! separator = "="
//!
//! [[jobs]]
//! name = "Baseline"
//! command = "python code/baseline.py"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::job::{builtin_jobs, Job, JobRegistry};
use crate::metric::MetricPattern;

pub const DEFAULT_ENV_VAR: &str = "CONDA_DEFAULT_ENV";
pub const DEFAULT_EXPECTED_ENV: &str = "twitter-sentiment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Jobs in run order.
    pub jobs: Vec<Job>,

    /// Environment name that must be active; `None` disables the check.
    pub expected_env: Option<String>,

    /// Variable holding the active environment name.
    pub env_var: String,

    /// Files that must exist before the batch runs.
    pub required_artifacts: Vec<PathBuf>,

    pub metric: MetricPattern,

    /// Run even when preflight reports warnings.
    pub proceed_despite_warnings: bool,

    /// Exit non-zero when any job fails.
    pub fail_on_error: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            jobs: builtin_jobs(),
            expected_env: Some(DEFAULT_EXPECTED_ENV.to_string()),
            env_var: DEFAULT_ENV_VAR.to_string(),
            required_artifacts: vec![
                PathBuf::from("twitter_cleaned-processed.csv"),
                PathBuf::from("twitter_cleaned-processed-freqdist.pkl"),
                PathBuf::from("twitter_cleaned-processed-freqdist-bi.pkl"),
            ],
            metric: MetricPattern::default(),
            proceed_despite_warnings: false,
            fail_on_error: false,
        }
    }
}

impl BenchConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(input)?;
        config.registry()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, or fall back to the defaults when none is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validated job registry for this config.
    pub fn registry(&self) -> Result<JobRegistry> {
        JobRegistry::new(self.jobs.clone())
    }
}
