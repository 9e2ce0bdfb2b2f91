//! Errors returned by the discovery application layer.

use thiserror::Error;

use crate::domain::discovery::ExtractionError;
use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::ports::ProfileStoreError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The fragment was malformed or violated a profile invariant.
    #[error("Invalid profile fragment: {0}")]
    Validation(#[from] ValidationError),

    /// A model response could not be turned into a fragment.
    #[error("Fragment extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The store failed. Never retried.
    #[error("Profile store failure: {0}")]
    Persistence(ProfileStoreError),

    /// Another writer updated the profile between load and save.
    #[error("Profile for user {user_id} was modified concurrently")]
    ConcurrencyConflict { user_id: UserId },
}

impl From<ProfileStoreError> for DiscoveryError {
    fn from(err: ProfileStoreError) -> Self {
        match err {
            ProfileStoreError::Conflict { user_id, .. } => {
                DiscoveryError::ConcurrencyConflict { user_id }
            }
            other => DiscoveryError::Persistence(other),
        }
    }
}

impl From<DiscoveryError> for DomainError {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::Validation(inner) => inner.into(),
            DiscoveryError::Extraction(ExtractionError::Schema(inner)) => inner.into(),
            DiscoveryError::Extraction(inner) => {
                DomainError::new(ErrorCode::ValidationFailed, inner.to_string())
            }
            DiscoveryError::Persistence(inner) => {
                DomainError::new(ErrorCode::DatabaseError, inner.to_string())
            }
            DiscoveryError::ConcurrencyConflict { user_id } => DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "Profile was modified concurrently, reload and retry",
            )
            .with_detail("user_id", user_id.as_str()),
        }
    }
}
