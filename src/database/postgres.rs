use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool};

use crate::database::manager::DatabaseManager;
use crate::database::models::{NewUser, User};
use crate::database::{Storage, StorageError};

const USER_COLUMNS: &str = "uid, uname, email, password, phone";

/// Relational backend over a shared connection pool
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select_watchlist(&self, user_id: &str) -> Result<Vec<Value>, StorageError> {
        let rows: Vec<Json<Value>> = sqlx::query_scalar(
            "SELECT movie_data FROM watchlist WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(movie)| movie).collect())
    }
}

#[async_trait]
impl Storage for PgStorage {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_uid(&self, uid: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE uid = $1",
            USER_COLUMNS
        ))
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (uid, uname, email, password, phone) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.uid)
        .bind(&user.uname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StorageError::Duplicate(user.email))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn list_watchlist(&self, user_id: &str) -> Result<Vec<Value>, StorageError> {
        self.select_watchlist(user_id).await
    }

    async fn add_to_watchlist(
        &self,
        user_id: &str,
        movie_id: i64,
        movie: Value,
    ) -> Result<Vec<Value>, StorageError> {
        sqlx::query(
            "INSERT INTO watchlist (user_id, movie_id, movie_data) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, movie_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(Json(&movie))
        .execute(&self.pool)
        .await?;

        self.select_watchlist(user_id).await
    }

    async fn remove_from_watchlist(
        &self,
        user_id: &str,
        movie_id: i64,
    ) -> Result<Vec<Value>, StorageError> {
        let result = sqlx::query("DELETE FROM watchlist WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Removed {} watchlist row(s) for {}", result.rows_affected(), user_id);
        self.select_watchlist(user_id).await
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
