//! Explicit configuration for the post domain.

use std::time::Duration;

/// Default upper bound on post text, in characters.
pub const DEFAULT_MAX_TEXT_LEN: usize = 1024;

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Limits applied by the post service and validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostConfig {
    /// Maximum length of a trimmed post text, in Unicode scalar values.
    pub max_text_len: usize,
    /// How long a store call may run before it is aborted.
    pub store_timeout: Duration,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}
