//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use miniblog_core::UploadPolicy;
use miniblog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub upload_dir: PathBuf,
    pub upload_policy: UploadPolicy,
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let db_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(db_defaults.url),
            max_connections: parsed_or("DB_MAX_CONNECTIONS", db_defaults.max_connections),
            min_connections: parsed_or("DB_MIN_CONNECTIONS", db_defaults.min_connections),
            connect_timeout: db_defaults.connect_timeout,
        };

        let policy_defaults = UploadPolicy::default();
        let upload_policy = UploadPolicy {
            max_bytes: parsed_or("UPLOAD_MAX_BYTES", policy_defaults.max_bytes),
            ..policy_defaults
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed_or("PORT", 8080),
            database,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/uploads")),
            upload_policy,
        }
    }
}
