//! Wires configuration into a ready-to-use engine.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::{FileProfileStore, InMemoryProfileStore, PgProfileStore};
use crate::application::DiscoveryProfileEngine;
use crate::config::{AppConfig, StorageBackend, ValidationError, DATABASE_URL_VAR};
use crate::ports::{DiscoveryProfileStore, ProfileStoreError};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Profile store setup failed: {0}")]
    Store(#[from] ProfileStoreError),
}

/// Builds the profile store selected by `storage.backend`.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn DiscoveryProfileStore>, BootstrapError> {
    config.validate()?;

    let store: Arc<dyn DiscoveryProfileStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryProfileStore::new()),
        StorageBackend::File => Arc::new(FileProfileStore::new(&config.storage.data_dir)),
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired(DATABASE_URL_VAR))?;
            let pool = database.pool_options().connect(&database.url).await?;
            let store = PgProfileStore::new(pool);
            if database.run_migrations {
                store.migrate().await?;
            }
            Arc::new(store)
        }
    };

    tracing::info!(backend = ?config.storage.backend, "Profile store ready");
    Ok(store)
}

/// Builds the engine over the configured store.
pub async fn build_engine(config: &AppConfig) -> Result<DiscoveryProfileEngine, BootstrapError> {
    let store = build_store(config).await?;
    Ok(DiscoveryProfileEngine::new(
        store,
        config.discovery.engine_settings(),
    ))
}
