use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PostId;

/// Post entity - a short text owned by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: PostId,
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Draft of a post that has not been stored yet.
    ///
    /// The store assigns `id` and `updated_at`; until then they hold
    /// [`PostId::nil()`] and the current time.
    pub fn new(author_id: PostId, text: impl Into<String>) -> Self {
        Self {
            id: PostId::nil(),
            author_id,
            text: text.into(),
            updated_at: Utc::now(),
        }
    }

    /// Replacement text for an existing post, addressed by id and author.
    pub fn edit(id: PostId, author_id: PostId, text: impl Into<String>) -> Self {
        Self {
            id,
            ..Self::new(author_id, text)
        }
    }

    /// Creation time, taken from the identifier.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }
}
