//! DiscoveryProfile document and its stored version.

use serde::{Deserialize, Serialize};

use super::{Assessments, Background, DiscoveryStage, Motivation};
use crate::domain::foundation::Timestamp;

/// The durable per-user discovery state.
///
/// One document per user. It is created lazily by the first merge and only
/// changes through [`ProfileMerger`](super::ProfileMerger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<Motivation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessments: Option<Assessments>,
    pub stage: DiscoveryStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    pub last_updated: Timestamp,
}

impl DiscoveryProfile {
    /// Profile returned for a user who has never been seen.
    pub fn first_visit(now: Timestamp) -> Self {
        Self {
            background: None,
            motivation: None,
            assessments: None,
            stage: DiscoveryStage::Background,
            completed_at: None,
            last_updated: now,
        }
    }

    /// Equality ignoring `last_updated`.
    pub fn same_content(&self, other: &DiscoveryProfile) -> bool {
        self.background == other.background
            && self.motivation == other.motivation
            && self.assessments == other.assessments
            && self.stage == other.stage
            && self.completed_at == other.completed_at
    }
}

/// Write counter kept beside the document for compare-and-swap saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileVersion(u32);

impl ProfileVersion {
    /// Version of a freshly created profile.
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn from_u32(value: u32) -> Result<Self, &'static str> {
        if value == 0 {
            Err("Profile version must be greater than 0")
        } else {
            Ok(Self(value))
        }
    }

    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A stored profile together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedProfile {
    pub version: ProfileVersion,
    pub profile: DiscoveryProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(rfc3339: &str) -> Timestamp {
        serde_json::from_value(json!(rfc3339)).unwrap()
    }

    #[test]
    fn first_visit_profile_is_background_with_nothing_collected() {
        let now = ts("2025-05-01T12:00:00Z");
        let profile = DiscoveryProfile::first_visit(now);

        assert_eq!(profile.stage, DiscoveryStage::Background);
        assert_eq!(profile.last_updated, now);
        assert!(profile.background.is_none());
        assert!(profile.motivation.is_none());
        assert!(profile.assessments.is_none());
        assert!(profile.completed_at.is_none());
    }

    #[test]
    fn serializes_to_camel_case_document() {
        let profile = DiscoveryProfile::first_visit(ts("2025-05-01T12:00:00Z"));
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["stage"], "background");
        assert!(value["lastUpdated"]
            .as_str()
            .unwrap()
            .starts_with("2025-05-01T12:00:00"));
        assert!(value.get("background").is_none());
        assert!(value.get("completedAt").is_none());
    }

    #[test]
    fn deserializes_stored_document() {
        let profile: DiscoveryProfile = serde_json::from_value(json!({
            "background": { "industry": "finance" },
            "stage": "complete",
            "completedAt": "2025-04-30T08:00:00Z",
            "lastUpdated": "2025-05-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(profile.stage, DiscoveryStage::Complete);
        assert_eq!(profile.completed_at, Some(ts("2025-04-30T08:00:00Z")));
        assert_eq!(
            profile.background.unwrap().industry.as_deref(),
            Some("finance")
        );
    }

    #[test]
    fn same_content_ignores_last_updated() {
        let a = DiscoveryProfile::first_visit(ts("2025-05-01T12:00:00Z"));
        let mut b = DiscoveryProfile::first_visit(ts("2025-06-01T12:00:00Z"));
        assert!(a.same_content(&b));

        b.stage = DiscoveryStage::Motivation;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn profile_version_starts_at_one_and_increments() {
        let v1 = ProfileVersion::initial();
        assert_eq!(v1.as_u32(), 1);
        assert_eq!(v1.increment().as_u32(), 2);
        assert!(ProfileVersion::from_u32(0).is_err());
        assert_eq!(ProfileVersion::from_u32(7).unwrap().to_string(), "v7");
    }
}
