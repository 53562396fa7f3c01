use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, Post, PostId, PostRevision, PostUpdate};
use crate::error::RepoError;

/// Persistence for posts and their comments.
///
/// Posts and comments share one repository because deleting a post must
/// remove its comments in the same transaction.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// All posts, newest first, optionally restricted to those whose title
    /// or content contains `search` (see [`Post::matches`]).
    async fn list_posts(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_post(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Persist a new post and return it with its assigned id.
    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply `update` to an existing post, returning the post as it was
    /// read and as it was written. `None` if the post does not exist.
    async fn update_post(
        &self,
        id: PostId,
        update: PostUpdate,
    ) -> Result<Option<PostRevision>, RepoError>;

    /// Delete the post and all its comments atomically, returning the
    /// removed post. `None` if the post does not exist.
    async fn delete_post(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Number of posts whose `image_filename` is `image`.
    async fn count_posts_with_image(&self, image: &str) -> Result<u64, RepoError>;

    /// Comments of a post, newest first. `None` if the post does not exist.
    async fn list_comments(&self, post_id: PostId) -> Result<Option<Vec<Comment>>, RepoError>;

    /// Persist a comment. `None` if the referenced post does not exist.
    async fn insert_comment(&self, comment: NewComment) -> Result<Option<Comment>, RepoError>;
}
