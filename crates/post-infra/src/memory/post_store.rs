//! In-memory post store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use post_core::DomainError;
use post_core::domain::{Post, PostId};
use post_core::ports::PostStore;

/// Post store holding rows in a map behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostStore {
    rows: RwLock<BTreeMap<PostId, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, post: &Post) -> Result<PostId, DomainError> {
        let id = PostId::generate();
        if id.is_nil() {
            return Err(DomainError::internal("identifier generation failed"));
        }

        let mut rows = self.rows.write().await;
        rows.insert(
            id,
            Post {
                id,
                author_id: post.author_id,
                text: post.text.clone(),
                updated_at: Utc::now(),
            },
        );

        Ok(id)
    }

    async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError> {
        let rows = self.rows.read().await;
        rows.get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("post {id}")))
    }

    async fn delete(&self, id: PostId, author_id: PostId) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().await;
        match rows.get(&id) {
            Some(row) if row.author_id == author_id => {
                rows.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn update(&self, post: &Post) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&post.id) {
            Some(row) if row.author_id == post.author_id => {
                row.text = post.text.clone();
                row.updated_at = row.updated_at.max(Utc::now());
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
