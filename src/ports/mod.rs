//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DiscoveryProfileStore` - Versioned persistence for discovery profiles

mod discovery_profile_store;

pub use discovery_profile_store::{DiscoveryProfileStore, ProfileStoreError};
