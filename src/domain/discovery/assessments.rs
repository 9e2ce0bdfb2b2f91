//! Stage 3 record: business acumen, personality and decision style.

use serde::{Deserialize, Serialize};

use super::merge::{merge_record, overwrite, MergeRecord};
use crate::domain::foundation::Percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionStyle {
    Analytical,
    Intuitive,
    Balanced,
    RiskSeeking,
    Collaborative,
}

/// One scenario question answered during the acumen assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcumenResponse {
    pub question: String,
    pub answer: String,
    pub correct: bool,
}

/// Business acumen result. The score is required whenever the record is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BusinessAcumen {
    pub score: Percentage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<AcumenResponse>>,
}

impl BusinessAcumen {
    pub fn new(score: Percentage) -> Self {
        Self {
            score,
            strengths: None,
            weaknesses: None,
            responses: None,
        }
    }
}

impl MergeRecord for BusinessAcumen {
    fn merge_from(&mut self, incoming: Self) {
        self.score = incoming.score;
        overwrite(&mut self.strengths, incoming.strengths);
        overwrite(&mut self.weaknesses, incoming.weaknesses);
        overwrite(&mut self.responses, incoming.responses);
    }

    fn is_empty(&self) -> bool {
        false
    }
}

/// Big Five trait scores, each collected independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Personality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openness: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conscientiousness: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraversion: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreeableness: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neuroticism: Option<Percentage>,
}

impl MergeRecord for Personality {
    fn merge_from(&mut self, incoming: Self) {
        overwrite(&mut self.openness, incoming.openness);
        overwrite(&mut self.conscientiousness, incoming.conscientiousness);
        overwrite(&mut self.extraversion, incoming.extraversion);
        overwrite(&mut self.agreeableness, incoming.agreeableness);
        overwrite(&mut self.neuroticism, incoming.neuroticism);
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Assessments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_acumen: Option<BusinessAcumen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_style: Option<DecisionStyle>,
}

impl MergeRecord for Assessments {
    fn merge_from(&mut self, incoming: Self) {
        merge_record(&mut self.business_acumen, incoming.business_acumen);
        merge_record(&mut self.personality, incoming.personality);
        overwrite(&mut self.decision_style, incoming.decision_style);
    }

    fn is_empty(&self) -> bool {
        self.business_acumen.is_none()
            && self.personality.as_ref().map_or(true, Personality::is_empty)
            && self.decision_style.is_none()
    }
}
