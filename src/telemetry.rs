//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter,
    filter::ParseError,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Filter used when neither `RUST_LOG` nor an explicit directive is given.
pub const DEFAULT_FILTER: &str = "info,todo_service=debug";

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Builds the event filter.
///
/// `RUST_LOG` wins over `directive`, which wins over [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `directive` is malformed.
pub fn filter(directive: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    Ok(EnvFilter::try_new(directive.unwrap_or(DEFAULT_FILTER))?)
}

/// Installs a formatted subscriber for the whole process.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is malformed or a subscriber
/// is already installed.
pub fn init(directive: Option<&str>) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(filter(directive)?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
