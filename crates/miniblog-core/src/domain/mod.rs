//! Domain entities - the core business objects.

mod comment;
pub mod image;
mod post;
mod validation;

use chrono::{DateTime, SubsecRound, Utc};

pub use comment::{Comment, CommentDraft, CommentId, NewComment};
pub use post::{NewPost, Post, PostChanges, PostDraft, PostId, PostRevision, PostUpdate};

/// Author recorded when none is supplied.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

pub const TITLE_MAX_LEN: usize = 100;
pub const AUTHOR_MAX_LEN: usize = 50;
pub const TAGS_MAX_LEN: usize = 100;
pub const IMAGE_FILENAME_MAX_LEN: usize = 200;

/// Current time, truncated to the microsecond precision every backend stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
