//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod engine;
mod errors;
pub mod handlers;

pub use engine::{DiscoveryProfileEngine, EngineSettings};
pub use errors::DiscoveryError;
pub use handlers::{
    GetCurrentStageHandler, GetCurrentStageQuery, GetProfileHandler, GetProfileQuery,
    MergeUpdateCommand, MergeUpdateHandler, MergeUpdateResult,
};
