//! Stage 1 record: professional background and work dissatisfaction.

use serde::{Deserialize, Serialize};

use super::merge::{overwrite, MergeRecord};
use super::validation::normalize_set;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    SelfEmployed,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    HighSchool,
    Bachelors,
    Masters,
    Phd,
    Other,
}

/// The main thing the user wants to get away from in their current work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PainPoint {
    Autonomy,
    Compensation,
    Culture,
    Growth,
    Purpose,
    Flexibility,
    Recognition,
}

/// Background collected during the first discovery stage.
///
/// Every field is optional: absence means "not collected yet". List fields
/// are replaced wholesale on merge, so callers send the full desired list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Background {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_frustrations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_pain_point: Option<PainPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_to_escape: Option<String>,
}

impl Background {
    /// Dedupes the set-valued lists. Free text, including an empty string,
    /// is kept as sent.
    pub fn normalize(&mut self) {
        normalize_set(&mut self.degrees);
        normalize_set(&mut self.certifications);
        normalize_set(&mut self.skills);
    }
}

impl MergeRecord for Background {
    fn merge_from(&mut self, incoming: Self) {
        overwrite(&mut self.employment_status, incoming.employment_status);
        overwrite(&mut self.industry, incoming.industry);
        overwrite(&mut self.years_of_experience, incoming.years_of_experience);
        overwrite(&mut self.education, incoming.education);
        overwrite(&mut self.degrees, incoming.degrees);
        overwrite(&mut self.certifications, incoming.certifications);
        overwrite(&mut self.skills, incoming.skills);
        overwrite(&mut self.work_frustrations, incoming.work_frustrations);
        overwrite(&mut self.primary_pain_point, incoming.primary_pain_point);
        overwrite(&mut self.what_to_escape, incoming.what_to_escape);
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
