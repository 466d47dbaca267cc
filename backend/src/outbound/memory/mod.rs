//! Process-local entity store used when no database is configured.

mod in_memory_store;

pub use in_memory_store::InMemoryStore;
