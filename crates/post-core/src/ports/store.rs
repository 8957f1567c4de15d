use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::DomainError;

/// Persistence contract for posts.
///
/// Implementations classify their own backend failures: a missing row is
/// [`DomainError::NotFound`], anything else is [`DomainError::Internal`].
/// Dropping a returned future aborts the call.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist `author_id` and `text`, assigning `id` and `updated_at`.
    async fn create(&self, post: &Post) -> Result<PostId, DomainError>;

    /// Fetch a fully populated post.
    async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError>;

    /// Delete the row matching both `id` and `author_id`.
    ///
    /// Returns the number of rows removed; zero is not an error here.
    async fn delete(&self, id: PostId, author_id: PostId) -> Result<u64, DomainError>;

    /// Replace `text` and refresh `updated_at` on the row matching both
    /// `post.id` and `post.author_id`.
    ///
    /// Returns the number of rows changed; zero is not an error here.
    async fn update(&self, post: &Post) -> Result<u64, DomainError>;
}
