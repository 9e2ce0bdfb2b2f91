//! Venture Discovery - guided discovery profile engine
//!
//! Accumulates a per-user discovery profile (background, motivation,
//! assessments) from partial updates produced during an onboarding
//! conversation, and tracks the user's discovery stage.
//!
//! The engine is built from configuration with [`bootstrap::build_engine`]
//! or directly with [`application::DiscoveryProfileEngine::new`] over any
//! [`ports::DiscoveryProfileStore`].

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
