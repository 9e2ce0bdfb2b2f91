//! Discovery profile store adapters.

mod file_store;
mod in_memory;
mod postgres_store;

pub use file_store::FileProfileStore;
pub use in_memory::InMemoryProfileStore;
pub use postgres_store::PgProfileStore;
