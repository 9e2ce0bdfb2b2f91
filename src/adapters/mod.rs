//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `discovery` - Profile stores (in-memory, YAML files, PostgreSQL)

pub mod discovery;

pub use discovery::{FileProfileStore, InMemoryProfileStore, PgProfileStore};
