//! # Post Core
//!
//! The domain layer of the post service: time-sortable identifiers, the post
//! entity and its validator, the error taxonomy, the store port and the
//! service that ties them together.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use config::PostConfig;
pub use error::{DomainError, ErrorCode};
pub use service::PostService;
