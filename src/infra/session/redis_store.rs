//! Redis-backed session store, shared across instances.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, Error, SessionStore};

use crate::errors::AppError;
use crate::infra::Cache;

#[derive(Serialize, Deserialize)]
struct Document {
    expires_at: i64,
    data: HashMap<String, Value>,
}

/// Sessions kept under `session:<id>`; Redis drops them on expiry.
#[derive(Clone)]
pub struct RedisStore {
    cache: Arc<Cache>,
}

impl RedisStore {
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self
            .cache
            .get_session::<Value>(&record.id.to_string())
            .await
            .map_err(backend)?
            .is_some()
        {
            record.id = Id::default();
        }
        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let expires_at = record.expiry_date.unix_timestamp();
        // SETEX rejects a zero expiry
        let ttl = (expires_at - OffsetDateTime::now_utc().unix_timestamp()).max(1) as u64;
        let document = Document {
            expires_at,
            data: record.data.clone(),
        };

        self.cache
            .set_session(&record.id.to_string(), &document, ttl)
            .await
            .map_err(backend)
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let Some(document) = self
            .cache
            .get_session::<Document>(&id.to_string())
            .await
            .map_err(backend)?
        else {
            return Ok(None);
        };

        let expiry_date = OffsetDateTime::from_unix_timestamp(document.expires_at)
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(Some(Record {
            id: *id,
            data: document.data,
            expiry_date,
        }))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.cache
            .delete_session(&id.to_string())
            .await
            .map_err(backend)
    }
}

fn backend(e: AppError) -> Error {
    Error::Backend(format!("{:?}", e))
}
