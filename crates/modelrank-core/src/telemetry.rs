//! Log setup for the `modelrank` binary.
//!
//! Lifecycle events from [`crate::obs`] are diagnostics, not part of the
//! report, so they are written to stderr. Only the first [`init_tracing`]
//! call installs a subscriber.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber.
///
/// `level` applies unless `RUST_LOG` supplies a filter. With `json` set,
/// each event becomes one JSON object per line for log collectors.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    // A subscriber already installed by an earlier call keeps running.
    installed.ok();
}
