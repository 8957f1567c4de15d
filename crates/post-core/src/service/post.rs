use std::future::Future;
use std::sync::Arc;

use crate::config::PostConfig;
use crate::domain::{Post, PostId, PostValidator};
use crate::error::DomainError;
use crate::ports::PostStore;

/// Post service - the single place post business rules live.
///
/// Holds no mutable state; clones share the same store handle.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    validator: PostValidator,
    config: PostConfig,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, config: PostConfig) -> Self {
        Self {
            store,
            validator: PostValidator::new(&config),
            config,
        }
    }

    /// Create a new post and return its store-assigned id.
    pub async fn create(&self, post: Post) -> Result<PostId, DomainError> {
        require_id(post.author_id, "author id")?;
        let post = self.validator.validate(post)?;

        let id = self.bounded(self.store.create(&post)).await?;
        tracing::debug!(post_id = %id, author_id = %post.author_id, "Post created");

        Ok(id)
    }

    /// Get a post by id.
    pub async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError> {
        require_id(id, "post id")?;
        self.bounded(self.store.get_by_id(id)).await
    }

    /// Delete a post owned by `author_id`.
    pub async fn delete(&self, id: PostId, author_id: PostId) -> Result<(), DomainError> {
        require_id(id, "post id")?;
        require_id(author_id, "author id")?;

        let affected = self.bounded(self.store.delete(id, author_id)).await?;
        if affected == 0 {
            return Err(self.explain_no_rows(id, author_id).await);
        }

        tracing::debug!(post_id = %id, author_id = %author_id, "Post deleted");
        Ok(())
    }

    /// Replace the text of a post owned by `post.author_id`.
    pub async fn update(&self, post: Post) -> Result<(), DomainError> {
        require_id(post.id, "post id")?;
        require_id(post.author_id, "author id")?;
        let post = self.validator.validate(post)?;

        let affected = self.bounded(self.store.update(&post)).await?;
        if affected == 0 {
            return Err(self.explain_no_rows(post.id, post.author_id).await);
        }

        tracing::debug!(post_id = %post.id, author_id = %post.author_id, "Post updated");
        Ok(())
    }

    /// An ownership-scoped mutation touched no rows: either the post is
    /// missing or someone else owns it.
    async fn explain_no_rows(&self, id: PostId, author_id: PostId) -> DomainError {
        match self.bounded(self.store.get_by_id(id)).await {
            Ok(_) => {
                tracing::warn!(post_id = %id, author_id = %author_id, "Mutation denied: caller is not the author");
                DomainError::permission_denied(format!("post {id} is not owned by {author_id}"))
            }
            Err(DomainError::NotFound(_)) => DomainError::not_found(format!("post {id}")),
            Err(e) => e,
        }
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T, F>(&self, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(timeout = ?self.config.store_timeout, "Store call timed out");
                Err(DomainError::internal("store call timed out"))
            }
        }
    }
}

fn require_id(id: PostId, what: &str) -> Result<(), DomainError> {
    if id.is_nil() {
        return Err(DomainError::invalid_argument(format!("{what} must not be nil")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::error::ErrorCode;

    /// Store fake that records how often it was called.
    #[derive(Default)]
    struct FakeStore {
        rows: Mutex<HashMap<PostId, Post>>,
        calls: AtomicUsize,
        fail: Option<DomainError>,
        delay: Option<Duration>,
    }

    impl FakeStore {
        fn failing(err: DomainError) -> Self {
            Self {
                fail: Some(err),
                ..Self::default()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn enter(&self) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.fail {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn create(&self, post: &Post) -> Result<PostId, DomainError> {
            self.enter().await?;
            let id = PostId::generate();
            let stored = Post {
                id,
                updated_at: Utc::now(),
                ..post.clone()
            };
            self.rows.lock().unwrap().insert(id, stored);
            Ok(id)
        }

        async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError> {
            self.enter().await?;
            self.rows
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| DomainError::not_found("no rows"))
        }

        async fn delete(&self, id: PostId, author_id: PostId) -> Result<u64, DomainError> {
            self.enter().await?;
            let mut rows = self.rows.lock().unwrap();
            match rows.get(&id) {
                Some(post) if post.author_id == author_id => {
                    rows.remove(&id);
                    Ok(1)
                }
                _ => Ok(0),
            }
        }

        async fn update(&self, post: &Post) -> Result<u64, DomainError> {
            self.enter().await?;
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&post.id) {
                Some(row) if row.author_id == post.author_id => {
                    row.text = post.text.clone();
                    row.updated_at = Utc::now().max(row.updated_at);
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn service(store: Arc<FakeStore>) -> PostService {
        PostService::new(store, PostConfig::default())
    }

    #[tokio::test]
    async fn test_create_stores_trimmed_text() {
        let store = Arc::new(FakeStore::default());
        let service = service(store.clone());
        let author = PostId::generate();

        let id = service.create(Post::new(author, "  hello  ")).await.unwrap();

        let post = service.get_by_id(id).await.unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.text, "hello");
    }

    #[tokio::test]
    async fn test_invalid_post_never_reaches_store() {
        let store = Arc::new(FakeStore::default());
        let service = service(store.clone());
        let author = PostId::generate();

        let err = service.create(Post::new(author, "   ")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let too_long = "x".repeat(PostConfig::default().max_text_len + 1);
        let err = service
            .update(Post::edit(PostId::generate(), author, too_long))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_nil_identifiers_are_rejected() {
        let store = Arc::new(FakeStore::default());
        let service = service(store.clone());
        let author = PostId::generate();

        let cases = [
            service.create(Post::new(PostId::nil(), "text")).await.map(|_| ()),
            service.get_by_id(PostId::nil()).await.map(|_| ()),
            service.delete(PostId::nil(), author).await,
            service.delete(PostId::generate(), PostId::nil()).await,
            service.update(Post::edit(PostId::nil(), author, "text")).await,
        ];

        for result in cases {
            assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidArgument);
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let store = Arc::new(FakeStore::failing(DomainError::internal("connection reset")));
        let service = service(store.clone());

        let err = service
            .create(Post::new(PostId::generate(), "hello"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.message(), "connection reset");
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let service = service(Arc::new(FakeStore::default()));

        let err = service.get_by_id(PostId::generate()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_mutations_by_other_author_are_denied() {
        let store = Arc::new(FakeStore::default());
        let service = service(store.clone());
        let owner = PostId::generate();
        let other = PostId::generate();
        let id = service.create(Post::new(owner, "mine")).await.unwrap();
        let before = service.get_by_id(id).await.unwrap();

        let err = service
            .update(Post::edit(id, other, "theirs"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);

        let err = service.delete(id, other).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);

        assert_eq!(service.get_by_id(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_mutations_of_missing_post_are_not_found() {
        let service = service(Arc::new(FakeStore::default()));
        let author = PostId::generate();

        let err = service.delete(PostId::generate(), author).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = service
            .update(Post::edit(PostId::generate(), author, "text"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_owner_can_update_and_delete() {
        let service = service(Arc::new(FakeStore::default()));
        let owner = PostId::generate();
        let id = service.create(Post::new(owner, "hello")).await.unwrap();
        let created = service.get_by_id(id).await.unwrap();

        service.update(Post::edit(id, owner, "bye")).await.unwrap();
        let updated = service.get_by_id(id).await.unwrap();
        assert_eq!(updated.text, "bye");
        assert!(updated.updated_at >= created.updated_at);

        service.delete(id, owner).await.unwrap();
        let err = service.get_by_id(id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_call_times_out() {
        let store = Arc::new(FakeStore::slow(Duration::from_secs(60)));
        let service = PostService::new(
            store,
            PostConfig {
                store_timeout: Duration::from_millis(100),
                ..PostConfig::default()
            },
        );

        let err = service.get_by_id(PostId::generate()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);
    }
}
