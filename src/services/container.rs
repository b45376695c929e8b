//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits only; `Services` wires the
//! concrete implementations over one shared unit of work.

use std::sync::Arc;

use super::{AuthService, ModerationService, ReportService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Registration, login and admin bootstrap
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Profile reads, edits and deletions
    fn moderation(&self) -> Arc<dyn ModerationService>;

    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    moderation_service: Arc<dyn ModerationService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        moderation_service: Arc<dyn ModerationService>,
        report_service: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            auth_service,
            moderation_service,
            report_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        use super::{Authenticator, Moderator, Reporter};

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config.admin.clone())),
            moderation_service: Arc::new(Moderator::new(uow.clone())),
            report_service: Arc::new(Reporter::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn moderation(&self) -> Arc<dyn ModerationService> {
        self.moderation_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockAuthService, MockModerationService, MockReportService};

    #[test]
    fn test_container_hands_out_shared_services() {
        let services = Services::new(
            Arc::new(MockAuthService::new()),
            Arc::new(MockModerationService::new()),
            Arc::new(MockReportService::new()),
        );

        assert!(Arc::ptr_eq(&services.auth(), &services.auth()));
        assert!(Arc::ptr_eq(&services.reports(), &services.reports()));
    }
}
