use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::validation::{author_or_default, optional, required};
use super::{AUTHOR_MAX_LEN, IMAGE_FILENAME_MAX_LEN, TAGS_MAX_LEN, TITLE_MAX_LEN};

pub type PostId = i32;

/// Post entity - a blog entry with optional image attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Apply a validated update in place and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, update: PostUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(image_filename) = update.image_filename {
            self.image_filename = Some(image_filename);
        }
        self.updated_at = now.max(self.updated_at);
    }

    /// Whether `term` occurs in the title or the content.
    ///
    /// ASCII letters compare case-insensitively; every other character must
    /// match exactly. SQL adapters implement the same predicate with
    /// `LOWER(column) LIKE`.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_ascii_lowercase();
        self.title.to_ascii_lowercase().contains(&needle)
            || self.content.to_ascii_lowercase().contains(&needle)
    }
}

/// A post before and after an update, read and written in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRevision {
    pub previous: Post,
    pub current: Post,
}

impl PostRevision {
    /// The image the post referenced before the update but no longer does.
    pub fn replaced_image(&self) -> Option<&str> {
        self.previous
            .image_filename
            .as_deref()
            .filter(|old| self.current.image_filename.as_deref() != Some(*old))
    }
}

/// Input for creating a post, with every optional field spelled out.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub tags: Option<String>,
    pub image_filename: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn image(mut self, image_filename: impl Into<String>) -> Self {
        self.image_filename = Some(image_filename.into());
        self
    }

    /// Check required fields and fill in defaults.
    pub fn validate(self) -> Result<NewPost, DomainError> {
        Ok(NewPost {
            title: required("title", self.title, Some(TITLE_MAX_LEN))?,
            content: required("content", self.content, None)?,
            author: author_or_default(self.author)?,
            tags: optional("tags", self.tags, TAGS_MAX_LEN)?,
            image_filename: optional("image_filename", self.image_filename, IMAGE_FILENAME_MAX_LEN)?,
            created_at: super::now(),
        })
    }
}

/// A validated post waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Option<String>,
    pub image_filename: Option<String>,
    /// Also the initial `updated_at`.
    pub created_at: DateTime<Utc>,
}

/// Input for editing a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Blank keeps the current author.
    pub author: Option<String>,
    /// Blank clears the tags.
    pub tags: Option<String>,
    pub image_filename: Option<String>,
}

impl PostChanges {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn image(mut self, image_filename: impl Into<String>) -> Self {
        self.image_filename = Some(image_filename.into());
        self
    }

    pub fn validate(self) -> Result<PostUpdate, DomainError> {
        let title = self
            .title
            .map(|t| required("title", t, Some(TITLE_MAX_LEN)))
            .transpose()?;
        let content = self
            .content
            .map(|c| required("content", c, None))
            .transpose()?;
        let author = optional("author", self.author, AUTHOR_MAX_LEN)?;
        let tags = self
            .tags
            .map(|t| optional("tags", Some(t), TAGS_MAX_LEN))
            .transpose()?;
        let image_filename =
            optional("image_filename", self.image_filename, IMAGE_FILENAME_MAX_LEN)?;

        Ok(PostUpdate {
            title,
            content,
            author,
            tags,
            image_filename,
        })
    }
}

/// A validated set of field replacements.
///
/// `tags` is doubly optional: `Some(None)` clears the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Option<String>>,
    pub image_filename: Option<String>,
}
