//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Redis connection
//! - Session storage backends
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod session;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    AuditRepository, AuditStore, EntrepreneurRepository, EntrepreneurStore, ExplorerRepository,
    ExplorerStore, UserRepository, UserStore,
};
pub use session::{DirectoryStore, Flash, FlashLevel, SessionUser};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAuditRepository, MockEntrepreneurRepository, MockExplorerRepository, MockUserRepository,
};
