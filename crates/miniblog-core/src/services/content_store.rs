//! Post and comment operations on top of a [`ContentRepository`].

use std::sync::Arc;

use crate::domain::{Comment, CommentDraft, Post, PostChanges, PostDraft, PostId, PostRevision};
use crate::error::DomainError;
use crate::ports::ContentRepository;

/// Content Store - validates input, applies defaults and turns missing
/// rows into `NotFound`. Persistence is delegated to the repository.
#[derive(Clone)]
pub struct ContentStore {
    repo: Arc<dyn ContentRepository>,
}

impl ContentStore {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// All posts newest first, or only those matching `search_query`.
    /// A blank query lists everything.
    pub async fn list_posts(&self, search_query: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let term = search_query.map(str::trim).filter(|q| !q.is_empty());
        let posts = self.repo.list_posts(term).await?;
        tracing::debug!(search = ?term, count = posts.len(), "Listed posts");
        Ok(posts)
    }

    pub async fn get_post(&self, id: PostId) -> Result<Post, DomainError> {
        self.repo
            .find_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let new_post = draft.validate()?;
        let post = self.repo.insert_post(new_post).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Replace the supplied fields; omitted fields keep their value.
    pub async fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post, DomainError> {
        Ok(self.revise_post(id, changes).await?.current)
    }

    /// Like [`update_post`](Self::update_post), but also returns the post as
    /// it was right before the change.
    pub async fn revise_post(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<PostRevision, DomainError> {
        let update = changes.validate()?;
        let revision = self
            .repo
            .update_post(id, update)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        tracing::info!(post_id = id, "Post updated");
        Ok(revision)
    }

    /// Delete a post together with its comments. Returns the removed post.
    pub async fn delete_post(&self, id: PostId) -> Result<Post, DomainError> {
        let post = self
            .repo
            .delete_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(post)
    }

    /// Whether any post still refers to the stored image `image`.
    pub async fn image_in_use(&self, image: &str) -> Result<bool, DomainError> {
        let count = self.repo.count_posts_with_image(image).await?;
        tracing::debug!(image = %image, posts = count, "Counted image references");
        Ok(count > 0)
    }

    pub async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        self.repo
            .list_comments(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    pub async fn add_comment(
        &self,
        post_id: PostId,
        draft: CommentDraft,
    ) -> Result<Comment, DomainError> {
        let new_comment = draft.validate(post_id)?;
        let comment = self
            .repo
            .insert_comment(new_comment)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        tracing::info!(post_id, comment_id = comment.id, "Comment added");
        Ok(comment)
    }
}
