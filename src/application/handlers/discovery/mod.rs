//! Discovery profile handlers.

mod get_current_stage;
mod get_profile;
mod merge_update;

#[cfg(test)]
pub(crate) mod mocks;

pub use get_current_stage::{GetCurrentStageHandler, GetCurrentStageQuery};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use merge_update::{MergeUpdateCommand, MergeUpdateHandler, MergeUpdateResult};
