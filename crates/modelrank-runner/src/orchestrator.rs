//! Sequential batch orchestration.

use modelrank_core::{
    batch_span, emit_batch_finished, emit_batch_started, emit_job_finished, emit_job_started,
    ExecutionResult, Job, JobOutcome, JobRecord, JobRegistry, MetricPattern, ResultSet,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::observer::RunObserver;
use crate::runner::CommandRunner;

/// Runs jobs one at a time and classifies each result.
///
/// A failing job is recorded and the batch moves on; `run_all` always
/// returns one entry per job.
pub struct Orchestrator<R> {
    runner: R,
    metric: MetricPattern,
    batch_id: Uuid,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            metric: MetricPattern::default(),
            batch_id: Uuid::new_v4(),
        }
    }

    pub fn with_metric(mut self, metric: MetricPattern) -> Self {
        self.metric = metric;
        self
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    /// Run every job in the registry.
    pub async fn run_registry(
        &self,
        registry: &JobRegistry,
        observer: &mut dyn RunObserver,
    ) -> ResultSet {
        let span = batch_span(&self.batch_id.to_string());
        span.in_scope(|| emit_batch_started(registry.len(), &registry.digest()));
        self.run_all(registry.jobs(), observer)
            .instrument(span)
            .await
    }

    /// Run `jobs` in order and collect their outcomes by name.
    pub async fn run_all(&self, jobs: &[Job], observer: &mut dyn RunObserver) -> ResultSet {
        let start = Instant::now();
        let mut results = ResultSet::new();

        for job in jobs {
            if let Err(e) = observer.job_started(job) {
                warn!(job = %job.name, error = %e, "Progress output failed");
            }

            let record = self.run_job(job).await;

            if let Err(e) = observer.job_finished(job, &record) {
                warn!(job = %job.name, error = %e, "Progress output failed");
            }
            results.insert(job.name.clone(), record.outcome);
        }

        emit_batch_finished(
            results.scored_count(),
            results.unavailable_count(),
            results.failed_count(),
            start.elapsed().as_millis() as u64,
        );
        results
    }

    /// Run a single job and classify its result.
    pub async fn run_job(&self, job: &Job) -> JobRecord {
        emit_job_started(&job.name, &job.command);

        let start = Instant::now();
        let execution = self.runner.run(&job.command).await;
        let elapsed = start.elapsed();

        let record = self.classify(job, execution, elapsed);
        emit_job_finished(&record);
        record
    }

    fn classify(&self, job: &Job, execution: ExecutionResult, elapsed: Duration) -> JobRecord {
        let (outcome, diagnostic) = if !execution.succeeded() {
            info!(job = %job.name, exit_status = execution.exit_status, "Job failed");
            (JobOutcome::Failed, Some(execution.stderr))
        } else {
            match self.metric.extract(&execution.stdout) {
                Some(value) => (JobOutcome::Score(value), None),
                None => (JobOutcome::Unavailable, None),
            }
        };

        JobRecord {
            name: job.name.clone(),
            outcome,
            exit_status: execution.exit_status,
            elapsed,
            diagnostic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::ScriptedRunner;
    use crate::observer::NullObserver;
    use std::sync::Arc;

    /// Records the order of observer callbacks.
    #[derive(Default)]
    struct RecordingObserver {
        events: Vec<String>,
    }

    impl RunObserver for RecordingObserver {
        fn job_started(&mut self, job: &Job) -> std::io::Result<()> {
            self.events.push(format!("start:{}", job.name));
            Ok(())
        }

        fn job_finished(&mut self, job: &Job, record: &JobRecord) -> std::io::Result<()> {
            self.events
                .push(format!("finish:{}:{}", job.name, record.outcome.label()));
            Ok(())
        }
    }

    struct BrokenObserver;

    impl RunObserver for BrokenObserver {
        fn job_started(&mut self, _job: &Job) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn jobs() -> Vec<Job> {
        vec![
            Job::new("A", "run-a"),
            Job::new("B", "run-b"),
            Job::new("C", "run-c"),
        ]
    }

    fn scripted() -> ScriptedRunner {
        ScriptedRunner::new()
            .with("run-a", 0, "Correct = 90.00%\n", "")
            .with("run-b", 1, "Correct = 99.00%\n", "boom")
            .with("run-c", 0, "no metric here\n", "")
    }

    #[tokio::test]
    async fn test_classifies_each_outcome() {
        let orchestrator = Orchestrator::new(scripted());
        let results = orchestrator.run_all(&jobs(), &mut NullObserver).await;

        assert_eq!(results.names(), vec!["A", "B", "C"]);
        assert_eq!(results.get("A"), Some(JobOutcome::Score(90.0)));
        assert_eq!(results.get("B"), Some(JobOutcome::Failed));
        assert_eq!(results.get("C"), Some(JobOutcome::Unavailable));
    }

    #[tokio::test]
    async fn test_runs_every_job_in_order_even_when_all_fail() {
        let runner = Arc::new(ScriptedRunner::new());
        let orchestrator = Orchestrator::new(runner.clone());
        let results = orchestrator.run_all(&jobs(), &mut NullObserver).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results.failed_count(), 3);
        assert_eq!(runner.calls(), vec!["run-a", "run-b", "run-c"]);
    }

    #[tokio::test]
    async fn test_failed_job_keeps_stderr() {
        let orchestrator = Orchestrator::new(scripted());
        let record = orchestrator.run_job(&Job::new("B", "run-b")).await;

        assert_eq!(record.outcome, JobOutcome::Failed);
        assert_eq!(record.exit_status, 1);
        assert_eq!(record.diagnostic.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_launch_failure_is_failed() {
        let orchestrator = Orchestrator::new(ScriptedRunner::new());
        let record = orchestrator.run_job(&Job::new("X", "missing")).await;

        assert_eq!(record.outcome, JobOutcome::Failed);
        assert_eq!(record.exit_status, modelrank_core::LAUNCH_FAILURE_STATUS);
        assert!(record.diagnostic.unwrap().contains("no script"));
    }

    #[tokio::test]
    async fn test_observer_sees_start_then_finish_per_job() {
        let orchestrator = Orchestrator::new(scripted());
        let mut observer = RecordingObserver::default();
        orchestrator.run_all(&jobs(), &mut observer).await;

        assert_eq!(
            observer.events,
            vec![
                "start:A",
                "finish:A:score",
                "start:B",
                "finish:B:failed",
                "start:C",
                "finish:C:unavailable",
            ]
        );
    }

    #[tokio::test]
    async fn test_observer_errors_do_not_stop_batch() {
        let orchestrator = Orchestrator::new(scripted());
        let results = orchestrator.run_all(&jobs(), &mut BrokenObserver).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_custom_metric_pattern() {
        let runner = ScriptedRunner::new().with("x", 0, "Accuracy: 42.5%", "");
        let orchestrator = Orchestrator::new(runner).with_metric(MetricPattern {
            keyword: "Accuracy".to_string(),
            separator: ':',
        });
        let record = orchestrator.run_job(&Job::new("X", "x")).await;
        assert_eq!(record.outcome, JobOutcome::Score(42.5));
    }

    #[tokio::test]
    async fn test_run_registry() {
        let registry = JobRegistry::new(jobs()).unwrap();
        let orchestrator = Orchestrator::new(scripted());
        let results = orchestrator.run_registry(&registry, &mut NullObserver).await;
        assert_eq!(results.len(), registry.len());
    }
}
