//! Server-side session storage for `tower-sessions`.
//!
//! A session holds the signed-in identity plus pending flash messages under
//! the keys in [`crate::config::session_keys`]. The backend is picked at
//! startup and wrapped in [`DirectoryStore`] so the session layer has one
//! concrete store type.

mod file;
mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tower_sessions::cookie::time::Duration;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, MemoryStore};

use crate::config::{Config, SessionBackend, MAX_SESSION_TTL_SECONDS};
use crate::domain::{User, UserRole};
use crate::errors::AppResult;

use super::Cache;

pub use self::file::FileStore;
pub use self::redis_store::RedisStore;

/// Identity stored for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
    Info,
}

/// One-shot message shown by the next rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// The session backend selected by configuration.
#[derive(Debug, Clone)]
pub enum DirectoryStore {
    Memory(MemoryStore),
    File(FileStore),
    Redis(RedisStore),
}

#[async_trait]
impl SessionStore for DirectoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.create(record).await,
            Self::File(store) => store.create(record).await,
            Self::Redis(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.save(record).await,
            Self::File(store) => store.save(record).await,
            Self::Redis(store) => store.save(record).await,
        }
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            Self::Memory(store) => store.load(id).await,
            Self::File(store) => store.load(id).await,
            Self::Redis(store) => store.load(id).await,
        }
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.delete(id).await,
            Self::File(store) => store.delete(id).await,
            Self::Redis(store) => store.delete(id).await,
        }
    }
}

/// Build the backend selected by `config.session_backend`.
///
/// The Redis backend reuses `cache`; without it the call falls back to
/// in-memory sessions.
pub async fn build_store(config: &Config, cache: Option<Arc<Cache>>) -> AppResult<DirectoryStore> {
    let store = match (config.session_backend, cache) {
        (SessionBackend::Redis, Some(cache)) => DirectoryStore::Redis(RedisStore::new(cache)),
        (SessionBackend::Redis, None) => {
            tracing::warn!("Redis session backend requested without a cache, using memory");
            DirectoryStore::Memory(MemoryStore::default())
        }
        (SessionBackend::File, _) => {
            DirectoryStore::File(FileStore::open(config.session_dir.clone()).await?)
        }
        (SessionBackend::Memory, _) => DirectoryStore::Memory(MemoryStore::default()),
    };

    tracing::info!(backend = ?config.session_backend, "Session store ready");
    Ok(store)
}

/// Inactivity expiry for `ttl_seconds`, capped at
/// [`MAX_SESSION_TTL_SECONDS`].
pub fn session_expiry(ttl_seconds: u64) -> Expiry {
    let seconds = ttl_seconds.min(MAX_SESSION_TTL_SECONDS);
    Expiry::OnInactivity(Duration::seconds(seconds as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_sessions::Session;

    #[test]
    fn test_flash_serialization() {
        let flash = Flash::new(FlashLevel::Success, "Bienvenido admin!");
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(json["level"], "success");

        let user = SessionUser {
            id: 1,
            username: "admin".into(),
            role: UserRole::Administrator,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"Administrador\""));
        assert_eq!(serde_json::from_str::<SessionUser>(&json).unwrap(), user);
    }

    #[test]
    fn test_huge_ttl_is_capped() {
        let seconds = |expiry: Expiry| match expiry {
            Expiry::OnInactivity(duration) => duration.whole_seconds(),
            other => panic!("unexpected expiry {:?}", other),
        };
        assert_eq!(
            seconds(session_expiry(u64::MAX)),
            MAX_SESSION_TTL_SECONDS as i64
        );
        assert_eq!(seconds(session_expiry(60)), 60);
    }

    #[tokio::test]
    async fn test_huge_ttl_session_still_saves() {
        let store = Arc::new(build_store(&Config::default(), None).await.unwrap());
        let session = Session::new(None, store.clone(), Some(session_expiry(u64::MAX)));

        session.insert("k", 1).await.unwrap();
        session.save().await.unwrap();

        let id = session.id().unwrap();
        assert!(store.load(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_build_memory_store_by_default() {
        let store = build_store(&Config::default(), None).await.unwrap();
        assert!(matches!(store, DirectoryStore::Memory(_)));
        assert!(store.load(&Id::default()).await.unwrap().is_none());
    }
}
