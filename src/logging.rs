//! Logging
//!
//! Diagnostics go through `tracing`. The subscriber is installed once by
//! `main`; its level comes from `RUST_LOG` and defaults to warnings only
//! (`-v` raises it to debug).
//!
//! The resolver additionally reports to a caller-supplied [`MessageLogger`],
//! the channel for messages a user should see about one resolution run
//! (evicted revisions, missing javadoc). [`TracingLogger`] forwards those to
//! `tracing` and is used when the caller supplies nothing.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "ivyfetch=warn";

/// Filter used with `--verbose`
const VERBOSE_FILTER: &str = "ivyfetch=debug";

/// Install the stderr subscriber
///
/// Repeated calls are ignored, so tests can call this freely.
pub fn init(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Receiver of user-facing resolution messages
pub trait MessageLogger: Send + Sync {
    /// Detail only interesting when diagnosing a resolution
    fn verbose(&self, message: &str);

    fn info(&self, message: &str);

    /// Something went wrong without failing the resolution
    fn warn(&self, message: &str);
}

/// Forwards resolution messages to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl MessageLogger for TracingLogger {
    fn verbose(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
