use std::time::Duration;

#[cfg(feature = "sql")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "sql")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the content database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://...` or `postgres://...`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Upper bound on connecting and on waiting for a pooled connection.
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://miniblog.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl DatabaseConfig {
    /// A private in-memory SQLite database. One connection, since every
    /// SQLite memory connection is its own database.
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Self::default()
        }
    }
}

/// Owned connection pool for the content database.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&DatabaseConfig::default()).await?;
/// db.migrate().await?;
/// let repo = SqlContentRepository::new(db.main);
/// ```
#[cfg(feature = "sql")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "sql")]
impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            backend = ?main.get_database_backend(),
            pool = config.max_connections,
            "Database connected"
        );

        Ok(Self { main })
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        Migrator::up(&self.main, None).await?;
        tracing::info!("Database schema up to date");
        Ok(())
    }
}
