//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the discovery domain.

mod command;
mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
