//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `VENTURE_DISCOVERY`
//! prefix and `__` to separate nested values. Every section has defaults,
//! so an empty environment yields an in-memory engine.
//!
//! # Example
//!
//! ```no_run
//! use venture_discovery::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod discovery;
mod error;
mod logging;
mod storage;

pub use database::{DatabaseConfig, DATABASE_URL_VAR};
pub use discovery::{DiscoveryConfig, MAX_CONFLICT_RETRIES};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VENTURE_DISCOVERY";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Which profile store to use
    #[serde(default)]
    pub storage: StorageConfig,

    /// PostgreSQL connection, required for the postgres backend only
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Stage policy and conflict retries
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VENTURE_DISCOVERY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `VENTURE_DISCOVERY__STORAGE__BACKEND=file` -> `storage.backend = file`
    /// - `VENTURE_DISCOVERY__DISCOVERY__STAGE_POLICY=forward_only`
    /// - `VENTURE_DISCOVERY__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The database section is only checked (and only required) when the
    /// postgres backend is selected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database
                .as_ref()
                .ok_or(ValidationError::MissingRequired(DATABASE_URL_VAR))?
                .validate()?;
        }
        self.discovery.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::discovery::StagePolicy;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "VENTURE_DISCOVERY__STORAGE__BACKEND",
        "VENTURE_DISCOVERY__STORAGE__DATA_DIR",
        "VENTURE_DISCOVERY__DATABASE__URL",
        "VENTURE_DISCOVERY__DISCOVERY__STAGE_POLICY",
        "VENTURE_DISCOVERY__DISCOVERY__CONFLICT_RETRIES",
        "VENTURE_DISCOVERY__LOGGING__LEVEL",
        "VENTURE_DISCOVERY__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.discovery.stage_policy, StagePolicy::CallerTrusted);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VENTURE_DISCOVERY__STORAGE__BACKEND", "file");
        env::set_var("VENTURE_DISCOVERY__STORAGE__DATA_DIR", "/var/lib/discovery");
        env::set_var("VENTURE_DISCOVERY__DISCOVERY__STAGE_POLICY", "forward_only");
        env::set_var("VENTURE_DISCOVERY__DISCOVERY__CONFLICT_RETRIES", "3");
        env::set_var("VENTURE_DISCOVERY__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/discovery"));
        assert_eq!(config.discovery.stage_policy, StagePolicy::ForwardOnly);
        assert_eq!(config.discovery.conflict_retries, 3);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VENTURE_DISCOVERY__STORAGE__BACKEND", "postgres");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired(DATABASE_URL_VAR))
        );
    }

    #[test]
    fn postgres_backend_with_database() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VENTURE_DISCOVERY__STORAGE__BACKEND", "postgres");
        env::set_var(DATABASE_URL_VAR, "postgresql://test@localhost/discovery");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.database.as_ref().map(|db| db.url.as_str()),
            Some("postgresql://test@localhost/discovery")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_validated_rejects_excess_retries() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VENTURE_DISCOVERY__DISCOVERY__CONFLICT_RETRIES", "50");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(
                ValidationError::TooManyConflictRetries { .. }
            ))
        ));
    }
}
