//! Repository layer - Data access abstraction
//!
//! Each store exposes a mockable read trait backed by the shared
//! connection, plus a `Tx*` variant bound to a running transaction for
//! writes.

mod audit_repository;
pub(crate) mod entities;
mod entrepreneur_repository;
mod explorer_repository;
mod user_repository;

pub use audit_repository::{AuditRepository, AuditStore, TxAuditRepository};
pub use entrepreneur_repository::{
    EntrepreneurRepository, EntrepreneurStore, TxEntrepreneurRepository,
};
pub use explorer_repository::{ExplorerRepository, ExplorerStore, TxExplorerRepository};
pub use user_repository::{TxUserRepository, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use audit_repository::MockAuditRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use entrepreneur_repository::MockEntrepreneurRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use explorer_repository::MockExplorerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
