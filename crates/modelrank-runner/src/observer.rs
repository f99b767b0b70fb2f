//! Progress reporting hooks for a running batch.

use modelrank_core::{Job, JobOutcome, JobRecord};
use std::io::{self, Write};

const BANNER_WIDTH: usize = 80;

/// Receives per-job progress from the orchestrator.
///
/// An `Err` from a hook is logged and otherwise ignored; it never stops the
/// batch.
pub trait RunObserver {
    fn job_started(&mut self, _job: &Job) -> io::Result<()> {
        Ok(())
    }

    fn job_finished(&mut self, _job: &Job, _record: &JobRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// A centred title between two rules of `=`.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "\n{rule}\n {:^w$}\n{rule}\n\n",
        title,
        w = BANNER_WIDTH - 2,
        rule = rule
    )
}

/// Human-readable progress, one banner per job.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> RunObserver for ConsoleObserver<W> {
    fn job_started(&mut self, job: &Job) -> io::Result<()> {
        write!(self.out, "{}", banner(&format!("Running model: {}", job.name)))?;
        writeln!(self.out, "> Running: {}", job.command)?;
        self.out.flush()
    }

    fn job_finished(&mut self, job: &Job, record: &JobRecord) -> io::Result<()> {
        match record.outcome {
            JobOutcome::Failed => {
                writeln!(self.out, "\nERROR running model {}:", job.name)?;
                writeln!(self.out, "{}", record.diagnostic.as_deref().unwrap_or(""))?;
            }
            JobOutcome::Score(value) => {
                writeln!(self.out, "\n> Accuracy: {:.2}%", value)?;
            }
            JobOutcome::Unavailable => {
                writeln!(self.out, "\n> Could not determine accuracy")?;
            }
        }
        writeln!(
            self.out,
            "> Elapsed time: {:.2} seconds",
            record.elapsed.as_secs_f64()
        )?;
        self.out.flush()
    }
}
