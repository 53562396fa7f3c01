//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use miniblog_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub tags: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            tags: model.tags,
            image_filename: model.image_filename,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// A new post becomes an insert with a database-assigned id.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(post.title),
            content: Set(post.content),
            author: Set(post.author),
            tags: Set(post.tags),
            image_filename: Set(post.image_filename),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.created_at.into()),
        }
    }
}

/// A full domain Post becomes an update of every mutable column.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author: Set(post.author),
            tags: Set(post.tags),
            image_filename: Set(post.image_filename),
            created_at: NotSet,
            updated_at: Set(post.updated_at.into()),
        }
    }
}
