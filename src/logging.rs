//! `tracing` bootstrap shared by every sub-command.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter applied when `RUST_LOG` is unset: crate events at info, request spans from tower-http.
const DEFAULT_FILTER: &str = "info,spam_classifier=info,tower_http=info";

/// Install the global subscriber. Logs go to stderr so `evaluate` and
/// `predict` can print JSON on stdout.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .try_init()?;
    Ok(())
}
