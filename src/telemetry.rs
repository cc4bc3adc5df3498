//! Logging setup.

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
/// `RUST_LOG` overrides the default filter. Output goes to stderr so it never
/// mixes with anything drawn on screen.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,torus_life=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}

/// Log how a run ended and return the process exit status for it.
/// Failures are reported here once, with their whole context chain.
pub fn report_outcome(outcome: &Result<()>) -> i32 {
    match outcome {
        Ok(()) => {
            info!("exiting");
            0
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "simulation aborted");
            1
        }
    }
}
