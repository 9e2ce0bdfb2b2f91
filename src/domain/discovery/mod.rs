//! Discovery domain: the per-user profile built up during guided onboarding.
//!
//! A profile is assembled from small fragments sent by the conversation
//! layer. Records for each stage live in their own module; [`ProfileMerger`]
//! folds a validated [`ProfileFragment`] into the stored [`DiscoveryProfile`].

mod assessments;
mod background;
mod extractor;
mod fragment;
mod merge;
mod motivation;
mod profile;
mod stage;
mod validation;

pub use assessments::{AcumenResponse, Assessments, BusinessAcumen, DecisionStyle, Personality};
pub use background::{Background, EducationLevel, EmploymentStatus, PainPoint};
pub use extractor::{
    ExtractionError, FragmentExtractor, ResponseSanitizer, SanitizationError, MAX_RESPONSE_LENGTH,
};
pub use fragment::ProfileFragment;
pub use merge::{MergeOutcome, ProfileMerger};
pub use motivation::{CapitalAvailable, Motivation, RiskTolerance, Timeline};
pub use profile::{DiscoveryProfile, ProfileVersion, VersionedProfile};
pub use stage::{DiscoveryStage, StagePolicy, StageResolution};
