//! Discovery stage and stage-resolution policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Onboarding progress, ordered background < motivation < assessment < complete.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStage {
    #[default]
    Background,
    Motivation,
    Assessment,
    Complete,
}

impl DiscoveryStage {
    /// All stages in progression order.
    pub const ALL: [DiscoveryStage; 4] = [
        DiscoveryStage::Background,
        DiscoveryStage::Motivation,
        DiscoveryStage::Assessment,
        DiscoveryStage::Complete,
    ];

    /// Wire name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryStage::Background => "background",
            DiscoveryStage::Motivation => "motivation",
            DiscoveryStage::Assessment => "assessment",
            DiscoveryStage::Complete => "complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DiscoveryStage::Complete)
    }
}

impl StateMachine for DiscoveryStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        target > self
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|s| s > self).collect()
    }
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("stage", format!("unknown stage '{}'", s))
            })
    }
}

/// How a caller-declared stage is reconciled with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePolicy {
    /// Any declared stage is taken at face value, including moves backward.
    #[default]
    CallerTrusted,
    /// Backward moves are ignored and the stored stage is kept.
    ForwardOnly,
}

/// Outcome of reconciling a requested stage against the stored stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageResolution {
    pub stage: DiscoveryStage,
    /// Set when a backward request was dropped under `ForwardOnly`.
    pub ignored: Option<DiscoveryStage>,
}

impl StagePolicy {
    /// Resolves the stage for a merge.
    ///
    /// The requested stage wins when present, then the stored stage, then
    /// `Background`. Stage never advances on its own.
    pub fn resolve(
        &self,
        stored: Option<DiscoveryStage>,
        requested: Option<DiscoveryStage>,
    ) -> StageResolution {
        match (stored, requested) {
            (Some(current), Some(target))
                if *self == StagePolicy::ForwardOnly
                    && target != current
                    && !current.can_transition_to(&target) =>
            {
                StageResolution {
                    stage: current,
                    ignored: Some(target),
                }
            }
            (_, Some(target)) => StageResolution {
                stage: target,
                ignored: None,
            },
            (stored, None) => StageResolution {
                stage: stored.unwrap_or_default(),
                ignored: None,
            },
        }
    }
}
