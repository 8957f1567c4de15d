//! In-memory implementations - used in tests and when no database is configured.

mod post_store;

pub use post_store::InMemoryPostStore;
