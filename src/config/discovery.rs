//! Discovery engine tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::EngineSettings;
use crate::domain::discovery::StagePolicy;

/// Upper bound on conflict retries.
pub const MAX_CONFLICT_RETRIES: u32 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryConfig {
    /// `caller_trusted` or `forward_only`
    #[serde(default)]
    pub stage_policy: StagePolicy,

    #[serde(default)]
    pub conflict_retries: u32,
}

impl DiscoveryConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            stage_policy: self.stage_policy,
            conflict_retries: self.conflict_retries,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.conflict_retries > MAX_CONFLICT_RETRIES {
            return Err(ValidationError::TooManyConflictRetries {
                max: MAX_CONFLICT_RETRIES,
            });
        }
        Ok(())
    }
}
