//! Structured lifecycle events for a batch.
//!
//! Events are emitted at `info!` level, or `warn!` for problems, and carry
//! an `event` field so they can be filtered in JSON log output.

use tracing::{info, warn, Span};

use crate::outcome::JobRecord;

/// Span that tags everything inside a batch with its id.
///
/// Attach it to the batch future with `tracing::Instrument` rather than
/// entering it across an `.await`.
pub fn batch_span(batch_id: &str) -> Span {
    tracing::info_span!("modelrank.batch", batch_id = %batch_id)
}

pub fn emit_batch_started(job_count: usize, registry_digest: &str) {
    info!(
        event = "batch.started",
        job_count = job_count,
        registry_digest = %registry_digest,
    );
}

pub fn emit_job_started(name: &str, command: &str) {
    info!(event = "job.started", job = %name, command = %command);
}

pub fn emit_job_finished(record: &JobRecord) {
    info!(
        event = "job.finished",
        job = %record.name,
        outcome = record.outcome.label(),
        score = record.outcome.score(),
        exit_status = record.exit_status,
        duration_ms = record.elapsed.as_millis() as u64,
    );
}

pub fn emit_batch_finished(scored: usize, unavailable: usize, failed: usize, duration_ms: u64) {
    info!(
        event = "batch.finished",
        scored = scored,
        unavailable = unavailable,
        failed = failed,
        duration_ms = duration_ms,
    );
}

pub fn emit_preflight_warning(warning: &str) {
    warn!(event = "preflight.warning", warning = %warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::JobOutcome;
    use std::time::Duration;

    #[test]
    fn test_emitters_do_not_panic_without_subscriber() {
        let _span = batch_span("batch-1").entered();
        emit_batch_started(2, "digest");
        emit_job_started("A", "echo");
        emit_job_finished(&JobRecord {
            name: "A".to_string(),
            outcome: JobOutcome::Score(1.0),
            exit_status: 0,
            elapsed: Duration::from_millis(5),
            diagnostic: None,
        });
        emit_batch_finished(1, 0, 0, 5);
        emit_preflight_warning("missing file");
    }
}
