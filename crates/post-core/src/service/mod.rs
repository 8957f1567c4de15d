//! Application services orchestrating validation and persistence.

mod post;

pub use post::PostService;
