//! MergeUpdate - Command handler for folding a fragment into a profile.

use std::sync::Arc;

use crate::application::DiscoveryError;
use crate::domain::discovery::{
    DiscoveryProfile, DiscoveryStage, ProfileFragment, ProfileMerger, ProfileVersion,
};
use crate::domain::foundation::{CommandMetadata, Timestamp, UserId};
use crate::ports::DiscoveryProfileStore;

/// Command to merge a fragment into a user's profile.
#[derive(Debug, Clone)]
pub struct MergeUpdateCommand {
    pub user_id: UserId,
    pub fragment: ProfileFragment,
}

/// Result of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeUpdateResult {
    pub profile: DiscoveryProfile,
    pub version: ProfileVersion,
    /// Backward stage dropped by a forward-only policy.
    pub ignored_stage: Option<DiscoveryStage>,
    /// `completedAt` dropped because the profile had not reached `complete`.
    pub ignored_completed_at: Option<Timestamp>,
    /// Load/merge/save rounds it took, 1 unless a conflict was retried.
    pub attempts: u32,
}

/// Handler for merge updates.
pub struct MergeUpdateHandler {
    store: Arc<dyn DiscoveryProfileStore>,
    merger: ProfileMerger,
    conflict_retries: u32,
}

impl MergeUpdateHandler {
    pub fn new(store: Arc<dyn DiscoveryProfileStore>, merger: ProfileMerger) -> Self {
        Self {
            store,
            merger,
            conflict_retries: 0,
        }
    }

    /// Re-run the whole load/merge/save up to `retries` extra times when a
    /// concurrent writer wins the race.
    pub fn with_conflict_retries(mut self, retries: u32) -> Self {
        self.conflict_retries = retries;
        self
    }

    #[tracing::instrument(
        name = "merge_update",
        skip_all,
        fields(
            user_id = %cmd.user_id,
            correlation_id = %metadata.correlation_id(),
            source = metadata.source()
        )
    )]
    pub async fn handle(
        &self,
        cmd: MergeUpdateCommand,
        metadata: CommandMetadata,
    ) -> Result<MergeUpdateResult, DiscoveryError> {
        // 1. Normalize before touching the store
        let fragment = cmd.fragment.normalized();

        let mut attempts = 0;
        loop {
            attempts += 1;

            // 2. Load current state
            let (existing, expected) = match self.store.load(&cmd.user_id).await? {
                Some(stored) => (Some(stored.profile), Some(stored.version)),
                None => (None, None),
            };

            // 3. Merge
            let outcome = self
                .merger
                .merge(existing.as_ref(), fragment.clone(), Timestamp::now());
            if let Some(ignored) = outcome.ignored_stage {
                tracing::warn!(
                    requested = %ignored,
                    kept = %outcome.profile.stage,
                    "Ignoring backward stage under forward-only policy"
                );
            }
            if let Some(ignored) = outcome.ignored_completed_at {
                tracing::warn!(
                    completed_at = %ignored,
                    stage = %outcome.profile.stage,
                    "Ignoring completedAt before the profile is complete"
                );
            }

            // 4. Persist as one versioned write
            match self.store.save(&cmd.user_id, &outcome.profile, expected).await {
                Ok(version) => {
                    tracing::debug!(%version, stage = %outcome.profile.stage, attempts, "Profile merged");
                    return Ok(MergeUpdateResult {
                        profile: outcome.profile,
                        version,
                        ignored_stage: outcome.ignored_stage,
                        ignored_completed_at: outcome.ignored_completed_at,
                        attempts,
                    });
                }
                Err(e) if e.is_conflict() && attempts <= self.conflict_retries => {
                    tracing::debug!(attempts, "Concurrent update detected, retrying merge");
                }
                Err(e) => {
                    if e.is_conflict() {
                        tracing::warn!(attempts, "Giving up after concurrent update");
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
