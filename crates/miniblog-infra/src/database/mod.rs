//! Database connection management and the SQL content repository.

mod connections;

#[cfg(feature = "sql")]
pub mod entity;
#[cfg(feature = "sql")]
mod sql_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "sql")]
pub use connections::DatabaseConnections;
#[cfg(feature = "sql")]
pub use sql_repo::SqlContentRepository;
