//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level is used. Fails if
/// a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (json, plain) = if config.json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init()
}
