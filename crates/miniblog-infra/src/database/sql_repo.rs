//! SQL content repository (SQLite or PostgreSQL through SeaORM).

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use miniblog_core::domain::{
    self, Comment, NewComment, NewPost, Post, PostId, PostRevision, PostUpdate,
};
use miniblog_core::error::RepoError;
use miniblog_core::ports::ContentRepository;

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};

/// Content repository over a SeaORM connection pool.
///
/// Multi-statement writes (cascade delete, comment insert, post update) run
/// in one transaction each; concurrent writers are ordered by the database.
pub struct SqlContentRepository {
    db: DbConn,
}

impl SqlContentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn write_err(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => RepoError::Query(e.to_string()),
    }
}

/// Escape character for LIKE patterns. Not a backslash, whose quoting
/// differs between SQLite and PostgreSQL string literals.
const LIKE_ESCAPE: char = '!';

/// Escape LIKE metacharacters so `term` matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(column) LIKE '%term%' ESCAPE '!'` with an ASCII-lowercased term.
fn contains_ignoring_ascii_case(column: post::Column, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_ascii_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

#[async_trait]
impl ContentRepository for SqlContentRepository {
    async fn list_posts(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(term) = search {
            query = query.filter(
                Condition::any()
                    .add(contains_ignoring_ascii_case(post::Column::Title, term))
                    .add(contains_ignoring_ascii_case(post::Column::Content, term)),
            );
        }

        let result = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding post by id");

        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert_post(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(&self.db).await.map_err(write_err)?;
        Ok(model.into())
    }

    async fn update_post(
        &self,
        id: PostId,
        update: PostUpdate,
    ) -> Result<Option<PostRevision>, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let Some(model) = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let previous: Post = model.into();
        let mut current = previous.clone();
        current.apply(update, domain::now());

        let active_model: post::ActiveModel = current.into();
        let model = active_model.update(&txn).await.map_err(write_err)?;
        txn.commit().await.map_err(query_err)?;

        Ok(Some(PostRevision {
            previous,
            current: model.into(),
        }))
    }

    async fn delete_post(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let Some(model) = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let removed = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(query_err)?;
        PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;
        txn.commit().await.map_err(query_err)?;

        tracing::debug!(post_id = id, comments = removed.rows_affected, "Post and comments deleted");
        Ok(Some(model.into()))
    }

    async fn count_posts_with_image(&self, image: &str) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::ImageFilename.eq(image))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Option<Vec<Comment>>, RepoError> {
        if self.find_post(post_id).await?.is_none() {
            return Ok(None);
        }

        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(Some(result.into_iter().map(Into::into).collect()))
    }

    async fn insert_comment(&self, new_comment: NewComment) -> Result<Option<Comment>, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let post_exists = PostEntity::find_by_id(new_comment.post_id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .is_some();
        if !post_exists {
            return Ok(None);
        }

        let active_model: comment::ActiveModel = new_comment.into();
        let model = active_model.insert(&txn).await.map_err(write_err)?;
        txn.commit().await.map_err(query_err)?;

        Ok(Some(model.into()))
    }
}
