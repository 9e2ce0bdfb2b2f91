//! In-Memory Profile Store Adapter
//!
//! Keeps versioned profiles in a map. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::discovery::{DiscoveryProfile, ProfileVersion, VersionedProfile};
use crate::domain::foundation::UserId;
use crate::ports::{DiscoveryProfileStore, ProfileStoreError};

/// In-memory storage for discovery profiles. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, VersionedProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored profiles (useful for tests)
    pub async fn clear(&self) {
        self.profiles.write().await.clear();
    }

    /// Number of users with a stored profile
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl DiscoveryProfileStore for InMemoryProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<VersionedProfile>, ProfileStoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(
        &self,
        user_id: &UserId,
        profile: &DiscoveryProfile,
        expected: Option<ProfileVersion>,
    ) -> Result<ProfileVersion, ProfileStoreError> {
        let mut profiles = self.profiles.write().await;
        let current = profiles.get(user_id).map(|stored| stored.version);

        if current != expected {
            return Err(ProfileStoreError::conflict(user_id, expected));
        }

        let version = current.map_or_else(ProfileVersion::initial, |v| v.increment());
        profiles.insert(
            user_id.clone(),
            VersionedProfile {
                version,
                profile: profile.clone(),
            },
        );
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn load_returns_none_for_unknown_user() {
        let store = InMemoryProfileStore::new();
        assert!(store.load(&user("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_then_update_bumps_version() {
        let store = InMemoryProfileStore::new();
        let alice = user("alice");
        let profile = DiscoveryProfile::first_visit(Timestamp::now());

        let v1 = store.save(&alice, &profile, None).await.unwrap();
        assert_eq!(v1, ProfileVersion::initial());

        let v2 = store.save(&alice, &profile, Some(v1)).await.unwrap();
        assert_eq!(v2.as_u32(), 2);

        let loaded = store.load(&alice).await.unwrap().unwrap();
        assert_eq!(loaded.version, v2);
        assert_eq!(loaded.profile, profile);
    }

    #[tokio::test]
    async fn create_conflicts_when_profile_exists() {
        let store = InMemoryProfileStore::new();
        let alice = user("alice");
        let profile = DiscoveryProfile::first_visit(Timestamp::now());

        store.save(&alice, &profile, None).await.unwrap();
        let err = store.save(&alice, &profile, None).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn stale_version_conflicts() {
        let store = InMemoryProfileStore::new();
        let alice = user("alice");
        let profile = DiscoveryProfile::first_visit(Timestamp::now());

        let v1 = store.save(&alice, &profile, None).await.unwrap();
        store.save(&alice, &profile, Some(v1)).await.unwrap();

        let err = store.save(&alice, &profile, Some(v1)).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryProfileStore::new();
        let profile = DiscoveryProfile::first_visit(Timestamp::now());

        store.save(&user("alice"), &profile, None).await.unwrap();
        assert!(store.load(&user("bob")).await.unwrap().is_none());
        assert_eq!(store.profile_count().await, 1);

        store.clear().await;
        assert_eq!(store.profile_count().await, 0);
    }
}
