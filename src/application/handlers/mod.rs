//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod discovery;

pub use discovery::{
    GetCurrentStageHandler, GetCurrentStageQuery, GetProfileHandler, GetProfileQuery,
    MergeUpdateCommand, MergeUpdateHandler, MergeUpdateResult,
};
