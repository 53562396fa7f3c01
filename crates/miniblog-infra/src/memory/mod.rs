//! In-memory content repository - used when no database is configured.

mod content;

pub use content::InMemoryContentRepository;
