//! Profile storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which profile store the engine is built on
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// One YAML file per user under `data_dir`
    File,
    /// PostgreSQL, configured by the `database` section
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
