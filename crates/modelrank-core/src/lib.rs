//! modelrank core library
//!
//! Domain types for running a fixed batch of external model jobs and
//! ranking them by the accuracy each one prints:
//! - [`JobRegistry`]: ordered, validated jobs
//! - [`MetricPattern`]: heuristic accuracy extraction from job output
//! - [`ResultSet`] / [`JobOutcome`]: per-job classification
//! - [`Report`]: ranked table and best-model conclusion

pub mod config;
pub mod error;
pub mod gate;
pub mod job;
pub mod metric;
pub mod obs;
pub mod outcome;
pub mod preflight;
pub mod report;
pub mod telemetry;

pub use config::BenchConfig;
pub use error::{ModelRankError, Result};
pub use gate::BatchVerdict;
pub use job::{Job, JobRegistry};
pub use metric::{extract_metric, MetricPattern};
pub use obs::{
    batch_span, emit_batch_finished, emit_batch_started, emit_job_finished, emit_job_started,
    emit_preflight_warning,
};
pub use outcome::{ExecutionResult, JobOutcome, JobRecord, ResultSet, LAUNCH_FAILURE_STATUS};
pub use preflight::{check_artifacts, EnvironmentStatus, PreflightDecision, PreflightReport};
pub use report::{rank, Report, ReportRow, FAILED_MARKER, UNAVAILABLE_MARKER};
pub use telemetry::init_tracing;

/// modelrank version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
