//! modelrank runner
//!
//! Executes a batch of model jobs one after another:
//! - [`CommandRunner`]: runs a command line and captures its output
//! - [`Orchestrator`]: times, classifies and collects every job
//! - [`RunObserver`]: progress hooks, with a console implementation

pub mod fakes;
pub mod observer;
pub mod orchestrator;
pub mod runner;

// Re-export key types
pub use observer::{banner, ConsoleObserver, NullObserver, RunObserver};
pub use orchestrator::Orchestrator;
pub use runner::{CommandRunner, ShellRunner};
