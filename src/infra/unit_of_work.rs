//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction lifecycle so a service can
//! write a user, its profile and the matching audit entry atomically.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    AuditRepository, AuditStore, EntrepreneurRepository, EntrepreneurStore, ExplorerRepository,
    ExplorerStore, TxAuditRepository, TxEntrepreneurRepository, TxExplorerRepository,
    TxUserRepository, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction method; tests
/// wrap mocked repositories in their own implementation instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn explorers(&self) -> Arc<dyn ExplorerRepository>;

    fn entrepreneurs(&self) -> Arc<dyn EntrepreneurRepository>;

    fn audit(&self) -> Arc<dyn AuditRepository>;

    /// Execute a closure within a READ COMMITTED transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access scoped to one database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'a> {
        TxUserRepository::new(self.txn)
    }

    pub fn explorers(&self) -> TxExplorerRepository<'a> {
        TxExplorerRepository::new(self.txn)
    }

    pub fn entrepreneurs(&self) -> TxEntrepreneurRepository<'a> {
        TxEntrepreneurRepository::new(self.txn)
    }

    pub fn audit(&self) -> TxAuditRepository<'a> {
        TxAuditRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    explorer_repo: Arc<ExplorerStore>,
    entrepreneur_repo: Arc<EntrepreneurStore>,
    audit_repo: Arc<AuditStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            explorer_repo: Arc::new(ExplorerStore::new(db.clone())),
            entrepreneur_repo: Arc::new(EntrepreneurStore::new(db.clone())),
            audit_repo: Arc::new(AuditStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn explorers(&self) -> Arc<dyn ExplorerRepository> {
        self.explorer_repo.clone()
    }

    fn entrepreneurs(&self) -> Arc<dyn EntrepreneurRepository> {
        self.entrepreneur_repo.clone()
    }

    fn audit(&self) -> Arc<dyn AuditRepository> {
        self.audit_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Shorthand for `uow.transaction(|ctx| Box::pin(async move { .. })).await`.
///
/// The body may use `?` and early `return`; its output is pinned to
/// `AppResult` so the error type never needs spelling out.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| {
            Box::pin(async move {
                let result: $crate::errors::AppResult<_> = async move { $body }.await;
                result
            })
        })
        .await
    };
}
