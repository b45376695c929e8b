//! Filesystem session store: one JSON document per session.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, Error, SessionStore};

use crate::errors::{AppError, AppResult};

#[derive(Serialize, Deserialize)]
struct Document {
    /// Unix seconds
    expires_at: i64,
    data: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for session files, creating it if needed.
    pub async fn open(dir: PathBuf) -> AppResult<Self> {
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create session dir: {}", e)))?;
        Ok(Self { dir })
    }

    /// Ids render as URL-safe base64, so they are valid file names.
    fn path(&self, id: &Id) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while tokio::fs::try_exists(self.path(&record.id))
            .await
            .map_err(backend)?
        {
            record.id = Id::default();
        }
        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let document = Document {
            expires_at: record.expiry_date.unix_timestamp(),
            data: record.data.clone(),
        };
        let json = serde_json::to_vec(&document).map_err(|e| Error::Encode(e.to_string()))?;

        tokio::fs::write(self.path(&record.id), json)
            .await
            .map_err(backend)
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let raw = match tokio::fs::read(self.path(id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(backend(e)),
        };

        let document: Document = match serde_json::from_slice(&raw) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Discarding unreadable session file: {}", e);
                self.delete(id).await?;
                return Ok(None);
            }
        };

        if document.expires_at <= OffsetDateTime::now_utc().unix_timestamp() {
            self.delete(id).await?;
            return Ok(None);
        }

        let expiry_date = OffsetDateTime::from_unix_timestamp(document.expires_at)
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(Some(Record {
            id: *id,
            data: document.data,
            expiry_date,
        }))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        match tokio::fs::remove_file(self.path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(backend(e)),
        }
    }
}

fn backend(e: std::io::Error) -> Error {
    Error::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_sessions::cookie::time::Duration;

    fn record(expires_in: Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::from([("user".to_string(), serde_json::json!({"id": 4}))]),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    async fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().to_path_buf()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let (dir, store) = store().await;
        let record = record(Duration::minutes(5));

        store.save(&record).await.unwrap();
        assert!(dir.path().join(format!("{}.json", record.id)).exists());

        let loaded = store.load(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.data, record.data);
        assert_eq!(
            loaded.expiry_date.unix_timestamp(),
            record.expiry_date.unix_timestamp()
        );

        store.delete(&record.id).await.unwrap();
        assert!(store.load(&record.id).await.unwrap().is_none());
        // Deleting twice is fine
        store.delete(&record.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_file_is_deleted() {
        let (dir, store) = store().await;
        let record = record(Duration::seconds(-1));

        store.save(&record).await.unwrap();
        assert!(store.load(&record.id).await.unwrap().is_none());
        assert!(!dir.path().join(format!("{}.json", record.id)).exists());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_discarded() {
        let (dir, store) = store().await;
        let id = Id::default();
        std::fs::write(dir.path().join(format!("{}.json", id)), b"{not json").unwrap();

        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_never_overwrites_existing_session() {
        let (_dir, store) = store().await;
        let first = record(Duration::minutes(5));
        store.save(&first).await.unwrap();

        let mut second = record(Duration::minutes(5));
        second.id = first.id;
        second.data.insert("flashes".into(), serde_json::json!([]));
        store.create(&mut second).await.unwrap();

        assert_ne!(second.id, first.id);
        assert_eq!(store.load(&first.id).await.unwrap().unwrap().data, first.data);
        assert!(store.load(&second.id).await.unwrap().is_some());
    }
}
