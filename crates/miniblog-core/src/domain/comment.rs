use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::PostId;
use super::validation::{author_or_default, required};

pub type CommentId = i32;

/// Comment entity - a reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a comment.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub author: Option<String>,
    pub content: String,
}

impl CommentDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            author: None,
            content: content.into(),
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn validate(self, post_id: PostId) -> Result<NewComment, DomainError> {
        Ok(NewComment {
            post_id,
            author: author_or_default(self.author)?,
            content: required("content", self.content, None)?,
            created_at: super::now(),
        })
    }
}

/// A validated comment waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_defaults_author() {
        let comment = CommentDraft::new("Nice!").validate(7).unwrap();
        assert_eq!(comment.post_id, 7);
        assert_eq!(comment.author, "Anonymous");
        assert_eq!(comment.content, "Nice!");
    }

    #[test]
    fn test_comment_requires_content() {
        let err = CommentDraft::new("").author("Bob").validate(7).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
