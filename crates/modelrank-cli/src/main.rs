//! modelrank - run a batch of model programs and rank them by accuracy
//!
//! ## Commands
//!
//! - `run`: check preconditions, run every job, print the ranked report
//! - `jobs`: list the configured jobs in run order
//! - `check`: run only the precondition checks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use modelrank_core::{
    check_artifacts, emit_preflight_warning, BatchVerdict, BenchConfig, EnvironmentStatus,
    PreflightDecision, PreflightReport, Report,
};
use modelrank_runner::{banner, ConsoleObserver, Orchestrator, ShellRunner};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "modelrank")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run model programs against a shared dataset and rank them by accuracy", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Config file (TOML); built-in jobs are used when omitted
    #[arg(short, long, global = true, env = "MODELRANK_CONFIG")]
    config: Option<PathBuf>,

    /// Directory the jobs run in and artifacts are checked against
    #[arg(short, long, global = true, default_value = ".")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every job and print the ranked report
    Run {
        /// Continue without asking when preconditions are not met
        #[arg(short, long)]
        yes: bool,

        /// Exit non-zero if any job fails
        #[arg(long)]
        fail_on_error: bool,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List configured jobs in run order
    Jobs,

    /// Check preconditions without running any job
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    modelrank_core::init_tracing(cli.json, level);

    let config = BenchConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load modelrank config")?;

    match cli.command {
        Commands::Run {
            yes,
            fail_on_error,
            format,
        } => {
            let mut config = config;
            config.proceed_despite_warnings |= yes;
            config.fail_on_error |= fail_on_error;

            let interactive = io::stdin().is_terminal();
            let (mut out, mut err, mut input) = (io::stdout(), io::stderr(), io::stdin().lock());
            let mut console = Console {
                out: &mut out,
                err: &mut err,
                input: &mut input,
                interactive,
            };
            let code = cmd_run(&config, &cli.workdir, format, &mut console).await?;
            Ok(ExitCode::from(code))
        }
        Commands::Jobs => cmd_jobs(&config).map(|_| ExitCode::SUCCESS),
        Commands::Check => cmd_check(&config, &cli.workdir).map(|_| ExitCode::SUCCESS),
    }
}

/// Terminal streams used by `run`.
///
/// stdout carries only the report (and, in table mode, job progress).
/// The preflight warnings, the confirmation prompt and verdict violations
/// all go to stderr.
struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    input: &'a mut dyn BufRead,
    /// Whether a human can answer the confirmation prompt.
    interactive: bool,
}

/// Run the batch, print the report and return the process exit code
async fn cmd_run(
    config: &BenchConfig,
    workdir: &Path,
    format: OutputFormat,
    console: &mut Console<'_>,
) -> Result<u8> {
    let registry = config.registry()?;

    if format == OutputFormat::Table {
        write!(console.out, "{}", banner("SENTIMENT MODEL COMPARISON"))?;
        console.out.flush()?;
    }

    let preflight = build_preflight(config, workdir);
    if preflight.has_warnings() {
        for warning in preflight.warnings() {
            writeln!(console.err, "{}", warning)?;
        }
        for artifact in &preflight.missing_artifacts {
            emit_preflight_warning(&format!("missing artifact {}", artifact.display()));
        }

        let proceed = config.proceed_despite_warnings
            || (console.interactive
                && confirm("\nContinue anyway? (y/n): ", console.input, console.err)?);
        if preflight.decide(proceed) == PreflightDecision::Abort {
            writeln!(console.err, "Aborted.")?;
            return Ok(0);
        }
    }

    let runner = ShellRunner::new().in_dir(workdir);
    let orchestrator = Orchestrator::new(runner).with_metric(config.metric.clone());
    info!(batch_id = %orchestrator.batch_id(), jobs = registry.len(), "Starting batch");

    // JSON keeps stdout for the report alone; progress moves to stderr.
    let results = {
        let progress: &mut dyn Write = match format {
            OutputFormat::Table => &mut *console.out,
            OutputFormat::Json => &mut *console.err,
        };
        let mut observer = ConsoleObserver::new(progress);
        orchestrator.run_registry(&registry, &mut observer).await
    };

    let report = Report::new(&results)
        .with_batch_id(orchestrator.batch_id())
        .with_registry_digest(registry.digest());

    match format {
        OutputFormat::Table => {
            write!(console.out, "{}", banner("COMPARATIVE RESULTS"))?;
            write!(console.out, "{}", report.render())?;
        }
        OutputFormat::Json => writeln!(console.out, "{}", report.to_json()?)?,
    }
    console.out.flush()?;

    let verdict = BatchVerdict::evaluate(&results, config.fail_on_error);
    info!(passed = verdict.passed, "{}", verdict.message);
    if !verdict.passed {
        writeln!(console.err, "{}", verdict.message)?;
        for violation in &verdict.violations {
            writeln!(console.err, "  - {}", violation)?;
        }
    }
    Ok(verdict.exit_code())
}

/// List jobs in run order
fn cmd_jobs(config: &BenchConfig) -> Result<()> {
    let registry = config.registry()?;
    for (idx, job) in registry.jobs().iter().enumerate() {
        println!("{:>2}. {:<20} {}", idx + 1, job.name, job.command);
    }
    println!("\nRegistry digest: {}", registry.digest());
    Ok(())
}

/// Report precondition warnings
fn cmd_check(config: &BenchConfig, workdir: &Path) -> Result<()> {
    let preflight = build_preflight(config, workdir);
    if !preflight.has_warnings() {
        println!("All preconditions met.");
        return Ok(());
    }

    for warning in preflight.warnings() {
        println!("{}", warning);
    }
    anyhow::bail!("Preconditions not met")
}

fn build_preflight(config: &BenchConfig, workdir: &Path) -> PreflightReport {
    let active_env = std::env::var(&config.env_var).ok();
    let environment =
        EnvironmentStatus::resolve(config.expected_env.as_deref(), active_env.as_deref());
    let missing = check_artifacts(workdir, &config.required_artifacts);
    PreflightReport::new(environment, missing)
}

/// Ask a yes/no question, prompting on `prompt_out`.
fn confirm(prompt: &str, input: &mut dyn BufRead, prompt_out: &mut dyn Write) -> Result<bool> {
    write!(prompt_out, "{}", prompt)?;
    prompt_out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}
