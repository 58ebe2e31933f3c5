//! JSON-file backend: `users.json` and `watchlist.json` in one directory.
//!
//! Each file has its own async mutex. A read-modify-write cycle holds it from
//! the read until the replacement file has been renamed into place, so writers
//! in this process never interleave.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::database::models::{NewUser, User, WatchlistEntry};
use crate::database::{Storage, StorageError};

pub const USERS_FILE: &str = "users.json";
pub const WATCHLIST_FILE: &str = "watchlist.json";

/// A JSON array of `T` on disk, guarded by a mutex.
struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    async fn open(path: PathBuf) -> Result<Self, StorageError> {
        let file = Self {
            path,
            lock: Mutex::new(()),
            _records: PhantomData,
        };

        let exists = tokio::fs::try_exists(&file.path)
            .await
            .map_err(|e| file.io_error(e))?;
        if !exists {
            file.write(&[]).await?;
            tracing::info!("Created {}", file.path.display());
        }

        Ok(file)
    }

    /// Snapshot of the current records
    async fn load(&self) -> Result<Vec<T>, StorageError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Run `apply` against the records under the lock and persist them when it
    /// reports a change.
    async fn update<R, F>(&self, apply: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<(R, bool), StorageError>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        let (result, changed) = apply(&mut records)?;
        if changed {
            self.write(&records).await?;
        }
        Ok(result)
    }

    async fn read(&self) -> Result<Vec<T>, StorageError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| self.io_error(e))?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&raw).map_err(|source| StorageError::Serialization {
            path: self.path.display().to_string(),
            source,
        })
    }

    async fn write(&self, records: &[T]) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(records).map_err(|source| StorageError::Serialization {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, content).await.map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Development fallback used when no database is configured
pub struct FileStorage {
    users: JsonFile<User>,
    watchlist: JsonFile<WatchlistEntry>,
}

impl FileStorage {
    /// Open (and create if needed) the two files under `data_dir`
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StorageError::Io {
                path: data_dir.display().to_string(),
                source,
            })?;

        Ok(Self {
            users: JsonFile::open(data_dir.join(USERS_FILE)).await?,
            watchlist: JsonFile::open(data_dir.join(WATCHLIST_FILE)).await?,
        })
    }
}

fn movies_of(entries: &[WatchlistEntry], user_id: &str) -> Vec<Value> {
    entries
        .iter()
        .filter(|entry| entry.user_id == user_id)
        .map(|entry| entry.movie.clone())
        .collect()
}

#[async_trait]
impl Storage for FileStorage {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.load().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn get_user_by_uid(&self, uid: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.load().await?;
        Ok(users.into_iter().find(|u| u.uid == uid))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        self.users
            .update(|users| {
                if users.iter().any(|u| u.email == user.email) {
                    return Err(StorageError::Duplicate(user.email));
                }
                let created = user.into_user();
                users.push(created.clone());
                Ok((created, true))
            })
            .await
    }

    async fn list_watchlist(&self, user_id: &str) -> Result<Vec<Value>, StorageError> {
        let entries = self.watchlist.load().await?;
        Ok(movies_of(&entries, user_id))
    }

    async fn add_to_watchlist(
        &self,
        user_id: &str,
        movie_id: i64,
        movie: Value,
    ) -> Result<Vec<Value>, StorageError> {
        self.watchlist
            .update(|entries| {
                let listed = entries
                    .iter()
                    .any(|e| e.user_id == user_id && e.movie_id == movie_id);
                if !listed {
                    entries.push(WatchlistEntry {
                        user_id: user_id.to_string(),
                        movie_id,
                        movie,
                    });
                }
                Ok((movies_of(entries, user_id), !listed))
            })
            .await
    }

    async fn remove_from_watchlist(
        &self,
        user_id: &str,
        movie_id: i64,
    ) -> Result<Vec<Value>, StorageError> {
        self.watchlist
            .update(|entries| {
                let before = entries.len();
                entries.retain(|e| !(e.user_id == user_id && e.movie_id == movie_id));
                let changed = entries.len() != before;
                Ok((movies_of(entries, user_id), changed))
            })
            .await
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        self.users.load().await?;
        self.watchlist.load().await?;
        Ok(())
    }
}
