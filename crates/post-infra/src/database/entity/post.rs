//! Post entity for SeaORM.

use post_core::DomainError;
use post_core::domain::{Post, PostId};
use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// Name of the post relation.
pub const TABLE_NAME: &str = "post";

/// Identifiers are stored in their 27-character canonical form, whose byte
/// order matches creation order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Char(Some(27))")]
    pub id: String,
    #[sea_orm(column_type = "Char(Some(27))", indexed)]
    pub author_id: String,
    pub text: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A row that cannot be decoded is a store failure, not a caller error.
impl TryFrom<Model> for Post {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let decode = |column: &str, value: &str| {
            PostId::parse(value).map_err(|e| {
                DomainError::internal(format!("corrupt {column} in {TABLE_NAME} row: {}", e.message()))
            })
        };

        Ok(Self {
            id: decode("id", &model.id)?,
            author_id: decode("author_id", &model.author_id)?,
            text: model.text,
            updated_at: model.updated_at.into(),
        })
    }
}

/// Row for a post whose id has already been assigned.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id.to_string()),
            author_id: Set(post.author_id.to_string()),
            text: Set(post.text),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
