//! # Post Infrastructure
//!
//! Concrete implementations of the ports defined in `post-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `auth` - JWT caller identity

pub mod database;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use database::PostgresPostStore;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
