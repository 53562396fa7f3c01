//! In-memory content repository.
//!
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use miniblog_core::domain::{
    self, Comment, CommentId, NewComment, NewPost, Post, PostId, PostRevision, PostUpdate,
};
use miniblog_core::error::RepoError;
use miniblog_core::ports::ContentRepository;

#[derive(Default)]
struct Tables {
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    last_post_id: PostId,
    last_comment_id: CommentId,
}

/// Content repository backed by maps behind one async `RwLock`.
///
/// Every write takes the write lock, so each operation is atomic.
#[derive(Default)]
pub struct InMemoryContentRepository {
    tables: RwLock<Tables>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(last: &mut i32, table: &str) -> Result<i32, RepoError> {
    *last = last
        .checked_add(1)
        .ok_or_else(|| RepoError::Constraint(format!("{table} id space exhausted")))?;
    Ok(*last)
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list_posts(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| search.is_none_or(|term| p.matches(term)))
            .cloned()
            .collect();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(posts)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert_post(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.last_post_id, "posts")?;
        let post = Post {
            id,
            title: new_post.title,
            content: new_post.content,
            author: new_post.author,
            tags: new_post.tags,
            image_filename: new_post.image_filename,
            created_at: new_post.created_at,
            updated_at: new_post.created_at,
        };
        tables.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: PostId,
        update: PostUpdate,
    ) -> Result<Option<PostRevision>, RepoError> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };
        let previous = post.clone();
        post.apply(update, domain::now());
        Ok(Some(PostRevision {
            previous,
            current: post.clone(),
        }))
    }

    async fn delete_post(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables.posts.remove(&id) else {
            return Ok(None);
        };
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(Some(post))
    }

    async fn count_posts_with_image(&self, image: &str) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        let count = tables
            .posts
            .values()
            .filter(|p| p.image_filename.as_deref() == Some(image))
            .count();
        Ok(count as u64)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Option<Vec<Comment>>, RepoError> {
        let tables = self.tables.read().await;
        if !tables.posts.contains_key(&post_id) {
            return Ok(None);
        }
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(Some(comments))
    }

    async fn insert_comment(&self, new_comment: NewComment) -> Result<Option<Comment>, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&new_comment.post_id) {
            return Ok(None);
        }
        let id = next_id(&mut tables.last_comment_id, "comments")?;
        let comment = Comment {
            id,
            post_id: new_comment.post_id,
            author: new_comment.author,
            content: new_comment.content,
            created_at: new_comment.created_at,
        };
        tables.comments.insert(id, comment.clone());
        Ok(Some(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniblog_core::domain::{CommentDraft, PostChanges, PostDraft};
    use miniblog_core::{ContentStore, DomainError};
    use std::sync::Arc;

    fn store() -> ContentStore {
        ContentStore::new(Arc::new(InMemoryContentRepository::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store();
        let created = store
            .create_post(PostDraft::new("Hello", "World").tags("intro"))
            .await
            .unwrap();

        let fetched = store.get_post(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.author, "Anonymous");
        assert_eq!(fetched.tags.as_deref(), Some("intro"));
    }

    #[tokio::test]
    async fn test_search_matches_title_or_content_newest_first() {
        let store = store();
        let a = store.create_post(PostDraft::new("xyz first", "a")).await.unwrap();
        store.create_post(PostDraft::new("other", "b")).await.unwrap();
        let c = store.create_post(PostDraft::new("third", "has XYZ")).await.unwrap();

        let ids: Vec<_> = store
            .list_posts(Some("xyz"))
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![c.id, a.id]);
        assert_eq!(store.list_posts(Some("")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let store = store();
        let post = store
            .create_post(PostDraft::new("Old", "Body").author("Ada").tags("t"))
            .await
            .unwrap();

        let updated = store
            .update_post(post.id, PostChanges::default().title("New"))
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.author, "Ada");
        assert_eq!(updated.tags.as_deref(), Some("t"));
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_delete_cascades_comments() {
        let store = store();
        let post = store.create_post(PostDraft::new("Hello", "World")).await.unwrap();
        store
            .add_comment(post.id, CommentDraft::new("Nice!"))
            .await
            .unwrap();
        assert_eq!(store.list_comments(post.id).await.unwrap().len(), 1);

        store.delete_post(post.id).await.unwrap();

        assert!(store.list_comments(post.id).await.unwrap_err().is_not_found());
        assert!(store.delete_post(post.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_comment_validation_and_missing_post() {
        let store = store();
        let err = store
            .add_comment(1, CommentDraft::new("hi"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let post = store.create_post(PostDraft::new("Hello", "World")).await.unwrap();
        let err = store
            .add_comment(post.id, CommentDraft::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_shared_image_stays_in_use_until_last_post_goes() {
        let store = store();
        let shared = "20240101000000_cat.png";
        let a = store.create_post(PostDraft::new("A", "a").image(shared)).await.unwrap();
        let b = store.create_post(PostDraft::new("B", "b").image(shared)).await.unwrap();

        let revision = store
            .revise_post(a.id, PostChanges::default().image("20240101000000_dog.png"))
            .await
            .unwrap();
        assert_eq!(revision.replaced_image(), Some(shared));
        assert!(store.image_in_use(shared).await.unwrap());

        store.delete_post(b.id).await.unwrap();
        assert!(!store.image_in_use(shared).await.unwrap());
    }
}
