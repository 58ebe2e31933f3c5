pub mod file;
pub mod manager;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;

pub use file::FileStorage;
pub use manager::DatabaseManager;
pub use models::{NewUser, PublicUser, User, WatchlistEntry};
pub use postgres::PgStorage;

/// Errors from either storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("User already exists: {0}")]
    Duplicate(String),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {path}: {source}")]
    Serialization {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Users and watchlists, backed by Postgres or by JSON files.
///
/// Every watchlist operation is scoped to one user id; list-returning
/// mutations hand back that user's list after the change, in insertion order.
#[async_trait]
pub trait Storage: Send + Sync {
    /// `"postgres"` or `"file"`
    fn backend(&self) -> &'static str;

    async fn get_user(&self, email: &str) -> Result<Option<User>, StorageError>;

    async fn get_user_by_uid(&self, uid: &str) -> Result<Option<User>, StorageError>;

    /// Fails with `StorageError::Duplicate` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    async fn list_watchlist(&self, user_id: &str) -> Result<Vec<Value>, StorageError>;

    /// Inserting a movie that is already listed leaves the list unchanged.
    async fn add_to_watchlist(
        &self,
        user_id: &str,
        movie_id: i64,
        movie: Value,
    ) -> Result<Vec<Value>, StorageError>;

    /// Removing a movie that is not listed is a no-op.
    async fn remove_from_watchlist(
        &self,
        user_id: &str,
        movie_id: i64,
    ) -> Result<Vec<Value>, StorageError>;

    async fn health_check(&self) -> Result<(), StorageError>;
}

/// Pick the backend once at startup: Postgres when a usable `DATABASE_URL`
/// is configured, the JSON files under `storage.data_dir` otherwise.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match config.database.url.as_deref() {
        Some(url) if DatabaseManager::is_usable_url(url) => {
            let pool = DatabaseManager::connect(url, &config.database).await?;
            DatabaseManager::initialize_schema(&pool).await?;
            Ok(Arc::new(PgStorage::new(pool)))
        }
        configured => {
            if configured.is_some() {
                tracing::warn!("DATABASE_URL is not a usable Postgres connection string, using JSON files");
            } else {
                tracing::warn!("Database not configured, using JSON files");
            }
            let storage = FileStorage::open(&config.storage.data_dir).await?;
            Ok(Arc::new(storage))
        }
    }
}
