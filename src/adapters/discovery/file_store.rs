//! File-based Profile Store Adapter
//!
//! Stores one YAML document per user at
//! `{base_dir}/discovery/{sha256(user_id)}/profile.yaml`. The directory name
//! is hashed so arbitrary user ids (emails, external ids) are safe on disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::discovery::{DiscoveryProfile, ProfileVersion, VersionedProfile};
use crate::domain::foundation::UserId;
use crate::ports::{DiscoveryProfileStore, ProfileStoreError};

/// File-based storage for discovery profiles.
///
/// Version checks are serialized by an in-process lock, so a directory must
/// not be shared by several processes writing the same users.
#[derive(Debug)]
pub struct FileProfileStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

/// On-disk layout of a profile file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredProfile {
    user_id: String,
    version: ProfileVersion,
    profile: DiscoveryProfile,
}

impl FileProfileStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn user_dir(&self, user_id: &UserId) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(user_id.as_str().as_bytes());
        self.base_path
            .join("discovery")
            .join(format!("{:x}", hasher.finalize()))
    }

    /// Full path to the profile file for a user
    pub fn profile_path(&self, user_id: &UserId) -> PathBuf {
        self.user_dir(user_id).join("profile.yaml")
    }

    async fn read_stored(&self, user_id: &UserId) -> Result<Option<StoredProfile>, ProfileStoreError> {
        let path = self.profile_path(user_id);

        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ProfileStoreError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl DiscoveryProfileStore for FileProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<VersionedProfile>, ProfileStoreError> {
        Ok(self.read_stored(user_id).await?.map(|stored| VersionedProfile {
            version: stored.version,
            profile: stored.profile,
        }))
    }

    async fn save(
        &self,
        user_id: &UserId,
        profile: &DiscoveryProfile,
        expected: Option<ProfileVersion>,
    ) -> Result<ProfileVersion, ProfileStoreError> {
        let _guard = self.write_lock.lock().await;

        let current = self.read_stored(user_id).await?.map(|stored| stored.version);
        if current != expected {
            return Err(ProfileStoreError::conflict(user_id, expected));
        }
        let version = current.map_or_else(ProfileVersion::initial, |v| v.increment());

        let yaml = serde_yaml::to_string(&StoredProfile {
            user_id: user_id.to_string(),
            version,
            profile: profile.clone(),
        })
        .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;

        let file_path = self.profile_path(user_id);
        fs::create_dir_all(self.user_dir(user_id))
            .await
            .map_err(|e| ProfileStoreError::Io(format!("Failed to create directory: {}", e)))?;

        // Write to a temporary file, then rename over the target
        let temp_path = file_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| ProfileStoreError::Io(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| ProfileStoreError::Io(format!("Failed to rename file: {}", e)))?;

        tracing::debug!(user_id = %user_id, %version, path = %file_path.display(), "Profile written");
        Ok(version)
    }
}
