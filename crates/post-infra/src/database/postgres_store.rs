//! PostgreSQL post store.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter};

use post_core::DomainError;
use post_core::domain::{Post, PostId};
use post_core::ports::PostStore;

use super::entity::post::{self, Entity as PostEntity};
use super::error_mapping::{classify_db_error, internal_db_error};

/// Post store backed by a SeaORM connection pool.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Give back the underlying connection.
    pub fn into_inner(self) -> DbConn {
        self.db
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn create(&self, post: &Post) -> Result<PostId, DomainError> {
        let id = PostId::generate();
        if id.is_nil() {
            return Err(DomainError::internal("identifier generation failed"));
        }

        let model = post::ActiveModel::from(Post {
            id,
            updated_at: Utc::now(),
            ..post.clone()
        });

        PostEntity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(internal_db_error)?;

        Ok(id)
    }

    async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError> {
        tracing::debug!(post_id = %id, "Finding post by id");

        let model = PostEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(classify_db_error)?
            .ok_or_else(|| DomainError::not_found(format!("post {id}")))?;

        Post::try_from(model)
    }

    async fn delete(&self, id: PostId, author_id: PostId) -> Result<u64, DomainError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.eq(id.to_string()))
            .filter(post::Column::AuthorId.eq(author_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(result.rows_affected)
    }

    async fn update(&self, post: &Post) -> Result<u64, DomainError> {
        // GREATEST keeps updated_at from moving backwards under clock skew.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Text, Expr::value(post.text.clone()))
            .col_expr(
                post::Column::UpdatedAt,
                Expr::cust_with_values("GREATEST(\"updated_at\", $1)", [Utc::now()]),
            )
            .filter(post::Column::Id.eq(post.id.to_string()))
            .filter(post::Column::AuthorId.eq(post.author_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(result.rows_affected)
    }
}
