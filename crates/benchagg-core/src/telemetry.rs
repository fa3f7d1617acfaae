//! Log subscriber setup for the `benchagg` binary.
//!
//! Everything the aggregator logs (rejected result files, slot conflicts,
//! renamed reports, the end-of-batch counters) goes to stderr. Stdout is
//! reserved for the list of written report paths, so the binary can be piped
//! into other tools without log lines getting in the way.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber.
///
/// `level` applies when `RUST_LOG` is unset; `-v` on the command line maps
/// to `DEBUG`, which also shows per-cohort speed normalization. With `json`
/// every event is one JSON object per line, carrying the `event` field set
/// by [`crate::obs`].
///
/// A second call is a no-op.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let json_layer = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();
}
