//! DiscoveryProfileEngine - the entry point used by the conversation layer.
//!
//! Wraps the discovery handlers behind a small API keyed by user id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::handlers::{
    GetCurrentStageHandler, GetCurrentStageQuery, GetProfileHandler, GetProfileQuery,
    MergeUpdateCommand, MergeUpdateHandler, MergeUpdateResult,
};
use super::DiscoveryError;
use crate::domain::discovery::{
    DiscoveryProfile, DiscoveryStage, FragmentExtractor, ProfileFragment, ProfileMerger,
    StagePolicy,
};
use crate::domain::foundation::{CommandMetadata, UserId};
use crate::ports::DiscoveryProfileStore;

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    pub stage_policy: StagePolicy,
    /// Extra attempts after a concurrent-update conflict.
    pub conflict_retries: u32,
}

pub struct DiscoveryProfileEngine {
    merge_update: MergeUpdateHandler,
    get_profile: GetProfileHandler,
    get_current_stage: GetCurrentStageHandler,
    extractor: FragmentExtractor,
}

impl DiscoveryProfileEngine {
    pub fn new(store: Arc<dyn DiscoveryProfileStore>, settings: EngineSettings) -> Self {
        Self {
            merge_update: MergeUpdateHandler::new(
                store.clone(),
                ProfileMerger::new(settings.stage_policy),
            )
            .with_conflict_retries(settings.conflict_retries),
            get_profile: GetProfileHandler::new(store.clone()),
            get_current_stage: GetCurrentStageHandler::new(store),
            extractor: FragmentExtractor::new(),
        }
    }

    /// Swaps in a custom extractor, e.g. one with extra sanitizer patterns.
    pub fn with_extractor(mut self, extractor: FragmentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Merges a fragment and returns the stored profile.
    pub async fn merge_update(
        &self,
        user_id: &UserId,
        fragment: ProfileFragment,
    ) -> Result<DiscoveryProfile, DiscoveryError> {
        self.merge_update_with(CommandMetadata::new(user_id.clone()), fragment)
            .await
            .map(|result| result.profile)
    }

    /// Full merge result, with caller-supplied metadata for tracing.
    pub async fn merge_update_with(
        &self,
        metadata: CommandMetadata,
        fragment: ProfileFragment,
    ) -> Result<MergeUpdateResult, DiscoveryError> {
        let cmd = MergeUpdateCommand {
            user_id: metadata.user_id.clone(),
            fragment,
        };
        self.merge_update.handle(cmd, metadata).await
    }

    /// Validates untyped JSON as a fragment, then merges it.
    pub async fn merge_update_json(
        &self,
        user_id: &UserId,
        fragment: serde_json::Value,
    ) -> Result<DiscoveryProfile, DiscoveryError> {
        let fragment = ProfileFragment::from_json_value(fragment)?;
        self.merge_update(user_id, fragment).await
    }

    /// Extracts a fragment from a raw model response, then merges it.
    pub async fn merge_update_from_response(
        &self,
        user_id: &UserId,
        response: &str,
    ) -> Result<DiscoveryProfile, DiscoveryError> {
        let fragment = self.extractor.extract(response)?;
        self.merge_update(user_id, fragment).await
    }

    pub async fn get_profile(&self, user_id: &UserId) -> Result<DiscoveryProfile, DiscoveryError> {
        self.get_profile
            .handle(GetProfileQuery {
                user_id: user_id.clone(),
            })
            .await
    }

    pub async fn get_current_stage(
        &self,
        user_id: &UserId,
    ) -> Result<DiscoveryStage, DiscoveryError> {
        self.get_current_stage
            .handle(GetCurrentStageQuery {
                user_id: user_id.clone(),
            })
            .await
    }
}
