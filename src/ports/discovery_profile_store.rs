//! DiscoveryProfileStore port - persistence for discovery profiles.
//!
//! One document per user, addressed by user id. Saves are versioned so that
//! concurrent merges for the same user cannot silently overwrite each other.

use async_trait::async_trait;

use crate::domain::discovery::{DiscoveryProfile, ProfileVersion, VersionedProfile};
use crate::domain::foundation::UserId;

/// Errors raised by profile store adapters.
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    /// The stored version no longer matches what the caller read.
    #[error("Profile for user {user_id} changed concurrently (expected {expected:?})")]
    Conflict {
        user_id: UserId,
        expected: Option<ProfileVersion>,
    },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ProfileStoreError {
    pub fn conflict(user_id: &UserId, expected: Option<ProfileVersion>) -> Self {
        ProfileStoreError::Conflict {
            user_id: user_id.clone(),
            expected,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ProfileStoreError::Conflict { .. })
    }
}

impl From<std::io::Error> for ProfileStoreError {
    fn from(err: std::io::Error) -> Self {
        ProfileStoreError::Io(err.to_string())
    }
}

/// Port for loading and saving discovery profiles.
#[async_trait]
pub trait DiscoveryProfileStore: Send + Sync {
    /// Loads the stored profile with its version, `None` if the user has none.
    async fn load(&self, user_id: &UserId) -> Result<Option<VersionedProfile>, ProfileStoreError>;

    /// Persists the whole profile document.
    ///
    /// With `expected = None` the profile must not exist yet. With
    /// `expected = Some(v)` the stored version must still be `v`. Either
    /// mismatch returns [`ProfileStoreError::Conflict`]. On success the new
    /// version is returned.
    async fn save(
        &self,
        user_id: &UserId,
        profile: &DiscoveryProfile,
        expected: Option<ProfileVersion>,
    ) -> Result<ProfileVersion, ProfileStoreError>;
}
