//! # MiniBlog Infrastructure
//!
//! Concrete implementations of the ports defined in `miniblog-core`.
//!
//! ## Feature Flags
//!
//! - `sql` (default) - SQLite/PostgreSQL content repository via SeaORM
//! - `minimal` - No database, in-memory only

pub mod database;
pub mod memory;
pub mod storage;

// Re-exports - In-Memory
pub use memory::InMemoryContentRepository;
pub use storage::LocalImageStore;

pub use database::DatabaseConfig;
#[cfg(feature = "sql")]
pub use database::{DatabaseConnections, SqlContentRepository};
