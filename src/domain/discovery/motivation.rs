//! Stage 2 record: motivation and goals.

use serde::{Deserialize, Serialize};

use super::merge::{overwrite, MergeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// When the user expects to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "3-6months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12months")]
    SixToTwelveMonths,
    #[serde(rename = "1year+")]
    OverAYear,
}

/// Capital the user can put into the venture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapitalAvailable {
    #[serde(rename = "under10k")]
    Under10k,
    #[serde(rename = "10k-50k")]
    From10kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "100k+")]
    Over100k,
    #[serde(rename = "seeking-funding")]
    SeekingFunding,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Motivation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_available: Option<CapitalAvailable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_definition: Option<String>,
}

impl MergeRecord for Motivation {
    fn merge_from(&mut self, incoming: Self) {
        overwrite(&mut self.primary_reason, incoming.primary_reason);
        overwrite(&mut self.risk_tolerance, incoming.risk_tolerance);
        overwrite(&mut self.timeline, incoming.timeline);
        overwrite(&mut self.capital_available, incoming.capital_available);
        overwrite(&mut self.success_definition, incoming.success_definition);
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_enum_names() {
        let motivation: Motivation = serde_json::from_value(json!({
            "riskTolerance": "high",
            "timeline": "6-12months",
            "capitalAvailable": "100k+"
        }))
        .unwrap();

        assert_eq!(motivation.risk_tolerance, Some(RiskTolerance::High));
        assert_eq!(motivation.timeline, Some(Timeline::SixToTwelveMonths));
        assert_eq!(motivation.capital_available, Some(CapitalAvailable::Over100k));
    }

    #[test]
    fn serializes_back_to_wire_names() {
        let motivation = Motivation {
            timeline: Some(Timeline::OverAYear),
            capital_available: Some(CapitalAvailable::SeekingFunding),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&motivation).unwrap(),
            json!({ "timeline": "1year+", "capitalAvailable": "seeking-funding" })
        );
    }

    #[test]
    fn rejects_unknown_timeline() {
        assert!(serde_json::from_value::<Motivation>(json!({ "timeline": "someday" })).is_err());
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let mut stored = Motivation {
            primary_reason: Some("independence".into()),
            risk_tolerance: Some(RiskTolerance::Low),
            ..Default::default()
        };
        stored.merge_from(Motivation {
            risk_tolerance: Some(RiskTolerance::Medium),
            ..Default::default()
        });

        assert_eq!(stored.primary_reason.as_deref(), Some("independence"));
        assert_eq!(stored.risk_tolerance, Some(RiskTolerance::Medium));
    }
}
