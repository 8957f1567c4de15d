//! Relational persistence for posts.

mod connections;

#[cfg(feature = "postgres")]
mod error_mapping;
#[cfg(feature = "postgres")]
mod postgres_store;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use error_mapping::classify_db_error;
#[cfg(feature = "postgres")]
pub use postgres_store::PostgresPostStore;
