//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `discovery` - Discovery profile records, stage progression and merge rules

pub mod discovery;
pub mod foundation;
