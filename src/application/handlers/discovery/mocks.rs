//! Test double for the profile store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::discovery::{DiscoveryProfile, ProfileVersion, VersionedProfile};
use crate::domain::foundation::UserId;
use crate::ports::{DiscoveryProfileStore, ProfileStoreError};

/// Map-backed store that counts calls and can fail or conflict on demand.
pub(crate) struct MockProfileStore {
    profiles: Mutex<HashMap<UserId, VersionedProfile>>,
    failure: Option<fn() -> ProfileStoreError>,
    pending_conflicts: AtomicUsize,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MockProfileStore {
    pub(crate) fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            failure: None,
            pending_conflicts: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        }
    }

    /// Every load and save returns the error built by `failure`.
    pub(crate) fn failing_with(failure: fn() -> ProfileStoreError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    /// The next `count` saves report a conflict.
    pub(crate) fn with_conflicts(self, count: usize) -> Self {
        self.pending_conflicts.store(count, Ordering::SeqCst);
        self
    }

    pub(crate) fn with_profile(self, user_id: &str, profile: DiscoveryProfile) -> Self {
        self.profiles.lock().unwrap().insert(
            UserId::new(user_id).unwrap(),
            VersionedProfile {
                version: ProfileVersion::initial(),
                profile,
            },
        );
        self
    }

    pub(crate) fn load_calls(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub(crate) fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiscoveryProfileStore for MockProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<VersionedProfile>, ProfileStoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn save(
        &self,
        user_id: &UserId,
        profile: &DiscoveryProfile,
        expected: Option<ProfileVersion>,
    ) -> Result<ProfileVersion, ProfileStoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        let conflicts = self.pending_conflicts.load(Ordering::SeqCst);
        if conflicts > 0 {
            self.pending_conflicts.store(conflicts - 1, Ordering::SeqCst);
            return Err(ProfileStoreError::conflict(user_id, expected));
        }

        let mut profiles = self.profiles.lock().unwrap();
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
