//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. They depend on the
//! `UnitOfWork` abstraction for repository access and transactions.

mod auth_service;
pub mod container;
mod moderation_service;
mod report_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, BootstrapOutcome};
pub use moderation_service::{ModerationService, Moderator};
pub use report_service::{ReportService, Reporter};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use moderation_service::MockModerationService;
#[cfg(any(test, feature = "test-utils"))]
pub use report_service::MockReportService;
