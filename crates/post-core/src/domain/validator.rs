//! Post text validation.

use crate::config::PostConfig;
use crate::error::DomainError;

use super::Post;

/// Decides whether a post's mutable fields are well-formed.
///
/// Only `text` is inspected. Identifiers and timestamps are checked by the
/// service and assigned by the store.
#[derive(Debug, Clone, Copy)]
pub struct PostValidator {
    max_text_len: usize,
}

impl PostValidator {
    pub fn new(config: &PostConfig) -> Self {
        Self {
            max_text_len: config.max_text_len,
        }
    }

    pub fn max_text_len(&self) -> usize {
        self.max_text_len
    }

    /// Validate a post, returning it with leading and trailing whitespace trimmed.
    pub fn validate(&self, mut post: Post) -> Result<Post, DomainError> {
        let trimmed = post.text.trim();

        if trimmed.is_empty() {
            return Err(DomainError::invalid_argument("post text must not be empty"));
        }

        let len = trimmed.chars().count();
        if len > self.max_text_len {
            return Err(DomainError::invalid_argument(format!(
                "post text is {len} characters, maximum is {}",
                self.max_text_len
            )));
        }

        if trimmed.len() != post.text.len() {
            post.text = trimmed.to_string();
        }
        Ok(post)
    }
}

impl Default for PostValidator {
    fn default() -> Self {
        Self::new(&PostConfig::default())
    }
}
