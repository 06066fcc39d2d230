//! # Telemetry
//!
//! Structured logging through `tracing`, printed by a `tracing_subscriber`
//! `fmt` layer.
//!
//! ## Feature matrix
//!
//! - `tracing` (default): the server and the `seqdev` core emit spans and
//!   events for the device lifecycle, connections and reads.
//!
//! Without `tracing` the subscriber is still installed, so anything logged
//! by dependencies through the `log` bridge is printed.
//!
//! ## Filtering
//!
//! The filter is read from `RUST_LOG` and defaults to `info`. Per-read
//! events are logged at `trace`:
//!
//! ```bash
//! RUST_LOG=seqdev=trace,seqdev_host=debug cargo run --bin seqdev-server
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// # Errors
/// Fails if a global subscriber has already been installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}
