//! Deep merge of a ProfileFragment into the stored DiscoveryProfile.

use super::{DiscoveryProfile, DiscoveryStage, ProfileFragment, StagePolicy};
use crate::domain::foundation::Timestamp;

/// A nested record that merges field by field.
pub(crate) trait MergeRecord: Sized {
    /// Applies every present field of `incoming` onto `self`.
    fn merge_from(&mut self, incoming: Self);

    /// True when the record carries no collected data.
    fn is_empty(&self) -> bool;
}

/// Scalar and list rule: a present incoming value replaces the slot.
pub(crate) fn overwrite<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

/// Record rule: merge into an existing record, or adopt a non-empty one.
pub(crate) fn merge_record<T: MergeRecord>(slot: &mut Option<T>, incoming: Option<T>) {
    let Some(incoming) = incoming else {
        return;
    };
    match slot {
        Some(current) => current.merge_from(incoming),
        None if !incoming.is_empty() => *slot = Some(incoming),
        None => {}
    }
}

/// Result of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub profile: DiscoveryProfile,
    /// Requested stage that was dropped by a forward-only policy.
    pub ignored_stage: Option<DiscoveryStage>,
    /// `completedAt` sent before the profile reached `complete`.
    pub ignored_completed_at: Option<Timestamp>,
}

/// Pure merge function. Holds no state beyond the stage policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileMerger {
    policy: StagePolicy,
}

impl ProfileMerger {
    pub fn new(policy: StagePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> StagePolicy {
        self.policy
    }

    /// Merges `fragment` into `existing` at time `now`.
    ///
    /// `existing = None` means the user has no stored profile yet. Stage is
    /// taken from the fragment, then the stored profile, then `Background`.
    /// `completedAt` is write-once and only recorded once the stage is
    /// `complete`. `lastUpdated` never moves backward.
    pub fn merge(
        &self,
        existing: Option<&DiscoveryProfile>,
        fragment: ProfileFragment,
        now: Timestamp,
    ) -> MergeOutcome {
        let ProfileFragment {
            background,
            motivation,
            assessments,
            stage,
            completed_at,
        } = fragment;

        let resolution = self.policy.resolve(existing.map(|p| p.stage), stage);

        let (mut merged, stored_completed_at, last_updated) = match existing {
            Some(current) => (
                current.clone(),
                current.completed_at,
                now.not_before(current.last_updated),
            ),
            None => (DiscoveryProfile::first_visit(now), None, now),
        };

        merge_record(&mut merged.background, background);
        merge_record(&mut merged.motivation, motivation);
        merge_record(&mut merged.assessments, assessments);

        let mut ignored_completed_at = None;
        merged.stage = resolution.stage;
        merged.completed_at = match (stored_completed_at, completed_at) {
            (Some(kept), _) => Some(kept),
            (None, given) if resolution.stage.is_complete() => given.or(Some(last_updated)),
            (None, given) => {
                ignored_completed_at = given;
                None
            }
        };
        merged.last_updated = last_updated;

        MergeOutcome {
            profile: merged,
            ignored_stage: resolution.ignored,
            ignored_completed_at,
        }
    }
}
