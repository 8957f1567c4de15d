//! # Post Shared
//!
//! Wire types exchanged with clients of the post service.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
