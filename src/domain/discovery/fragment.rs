//! ProfileFragment: the typed, validated partial update.
//!
//! Untyped JSON coming out of the chat layer is turned into a fragment here,
//! before anything reaches the merge. Unknown keys, unknown enum values,
//! wrong types and out-of-range scores are rejected up front. Empty strings
//! are valid values and `null` reads as absent.

use serde::{Deserialize, Serialize};

use super::{Assessments, Background, DiscoveryStage, Motivation};
use crate::domain::foundation::{Timestamp, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<Motivation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessments: Option<Assessments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<DiscoveryStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl ProfileFragment {
    /// Parses and validates a fragment from a JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::invalid_format(
                "fragment",
                "expected a JSON object",
            ));
        }
        let fragment: ProfileFragment = serde_json::from_value(value)
            .map_err(|e| ValidationError::invalid_format("fragment", e.to_string()))?;
        Ok(fragment.normalized())
    }

    /// Parses and validates a fragment from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_format("fragment", e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Dedupes set-valued lists. Idempotent.
    pub fn normalized(mut self) -> Self {
        if let Some(background) = self.background.as_mut() {
            background.normalize();
        }
        self
    }

    /// True when the fragment carries nothing to merge.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_motivation(mut self, motivation: Motivation) -> Self {
        self.motivation = Some(motivation);
        self
    }

    pub fn with_assessments(mut self, assessments: Assessments) -> Self {
        self.assessments = Some(assessments);
        self
    }

    pub fn with_stage(mut self, stage: DiscoveryStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_completed_at(mut self, at: Timestamp) -> Self {
        self.completed_at = Some(at);
        self
    }
}
