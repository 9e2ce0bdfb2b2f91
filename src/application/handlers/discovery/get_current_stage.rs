//! GetCurrentStage - Query handler projecting the stage of a profile.

use std::sync::Arc;

use crate::application::DiscoveryError;
use crate::domain::discovery::DiscoveryStage;
use crate::domain::foundation::UserId;
use crate::ports::DiscoveryProfileStore;

#[derive(Debug, Clone)]
pub struct GetCurrentStageQuery {
    pub user_id: UserId,
}

pub struct GetCurrentStageHandler {
    store: Arc<dyn DiscoveryProfileStore>,
}

impl GetCurrentStageHandler {
    pub fn new(store: Arc<dyn DiscoveryProfileStore>) -> Self {
        Self { store }
    }

    /// Stage of the stored profile, `Background` for unknown users.
    #[tracing::instrument(name = "get_current_stage", skip_all, fields(user_id = %query.user_id))]
    pub async fn handle(&self, query: GetCurrentStageQuery) -> Result<DiscoveryStage, DiscoveryError> {
        Ok(self
            .store
            .load(&query.user_id)
            .await?
            .map(|stored| stored.profile.stage)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::discovery::mocks::MockProfileStore;
    use crate::domain::discovery::DiscoveryProfile;
    use crate::domain::foundation::Timestamp;
    use crate::ports::ProfileStoreError;

    fn query(id: &str) -> GetCurrentStageQuery {
        GetCurrentStageQuery {
            user_id: UserId::new(id).unwrap(),
        }
    }

    #[tokio::test]
    async fn defaults_to_background() {
        let handler = GetCurrentStageHandler::new(Arc::new(MockProfileStore::new()));
        assert_eq!(
            handler.handle(query("nobody")).await.unwrap(),
            DiscoveryStage::Background
        );
    }

    #[tokio::test]
    async fn reads_stored_stage() {
        let mut profile = DiscoveryProfile::first_visit(Timestamp::now());
        profile.stage = DiscoveryStage::Complete;
        let store = Arc::new(MockProfileStore::new().with_profile("done", profile));

        let handler = GetCurrentStageHandler::new(store);
        assert_eq!(handler.handle(query("done")).await.unwrap(), DiscoveryStage::Complete);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = Arc::new(MockProfileStore::failing_with(|| {
            ProfileStoreError::Io("unreadable".into())
        }));
        assert!(GetCurrentStageHandler::new(store)
            .handle(query("any"))
            .await
            .is_err());
    }
}
