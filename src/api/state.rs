//! Application state - Dependency injection container.

use std::sync::Arc;

use tower_sessions::SessionManagerLayer;

use crate::api::middleware::session_layer;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::session::build_store;
use crate::infra::{Cache, Database, DirectoryStore};
use crate::services::{AuthService, ModerationService, ReportService, ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    /// Cookie session layer over the configured store
    pub sessions: SessionManagerLayer<DirectoryStore>,
    /// Database connection
    pub database: Arc<Database>,
    /// Redis, when configured
    pub cache: Option<Arc<Cache>>,
}

impl AppState {
    /// Wire services and the configured session backend.
    pub async fn from_config(
        database: Arc<Database>,
        cache: Option<Arc<Cache>>,
        config: &Config,
    ) -> AppResult<Self> {
        let services = Arc::new(Services::from_connection(database.get_connection(), config));
        let sessions = session_layer(build_store(config, cache.clone()).await?, config);

        Ok(Self {
            services,
            sessions,
            database,
            cache,
        })
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.services.auth()
    }

    pub fn moderation(&self) -> Arc<dyn ModerationService> {
        self.services.moderation()
    }

    pub fn reports(&self) -> Arc<dyn ReportService> {
        self.services.reports()
    }
}
