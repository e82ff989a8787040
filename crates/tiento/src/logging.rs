//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events. Binaries and test suites that
//! want to see them install a subscriber here. `RUST_LOG` takes precedence
//! over the filter passed in.

use tracing_subscriber::EnvFilter;

use crate::result::{TientoError, TientoResult};

/// Filter used when neither `RUST_LOG` nor the caller supplies one
pub const DEFAULT_LOG_FILTER: &str = "tiento=info";

fn env_filter(fallback: &str) -> TientoResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback).map_err(|e| TientoError::Logging {
            message: format!("invalid filter '{fallback}': {e}"),
        }),
    }
}

/// Install a global formatting subscriber.
///
/// # Errors
///
/// Returns [`TientoError::Logging`] if `filter` does not parse or a global
/// subscriber is already installed.
pub fn init_logging(filter: &str) -> TientoResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter)?)
        .with_target(true)
        .try_init()
        .map_err(|e| TientoError::Logging {
            message: e.to_string(),
        })
}

/// Install a global JSON subscriber, one event per line.
///
/// # Errors
///
/// Same as [`init_logging`].
pub fn init_json_logging(filter: &str) -> TientoResult<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(filter)?)
        .try_init()
        .map_err(|e| TientoError::Logging {
            message: e.to_string(),
        })
}

/// Route events to the test harness output capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let filter = env_filter("tiento=debug").unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
