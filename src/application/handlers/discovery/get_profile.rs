//! GetProfile - Query handler for a user's discovery profile.

use std::sync::Arc;

use crate::application::DiscoveryError;
use crate::domain::discovery::DiscoveryProfile;
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::DiscoveryProfileStore;

/// Query for a user's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

/// Returns the stored profile, or a fresh first-visit profile for unknown
/// users. Never writes.
pub struct GetProfileHandler {
    store: Arc<dyn DiscoveryProfileStore>,
}

impl GetProfileHandler {
    pub fn new(store: Arc<dyn DiscoveryProfileStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "get_profile", skip_all, fields(user_id = %query.user_id))]
    pub async fn handle(&self, query: GetProfileQuery) -> Result<DiscoveryProfile, DiscoveryError> {
        match self.store.load(&query.user_id).await? {
            Some(stored) => Ok(stored.profile),
            None => {
                tracing::debug!("No stored profile, returning first-visit profile");
                Ok(DiscoveryProfile::first_visit(Timestamp::now()))
            }
        }
    }
}
