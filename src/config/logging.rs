//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `venture_discovery=debug`
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogLevel(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
