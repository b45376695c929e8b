//! Append-only audit log.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::audit_log::{self, ActiveModel, Entity as AuditEntity};
use crate::domain::{AuditEntry, NewAuditEntry};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Every entry, newest first.
    async fn list_recent(&self) -> AppResult<Vec<AuditEntry>>;

    /// Entries whose action label contains `fragment`.
    async fn count_action_containing(&self, fragment: &str) -> AppResult<u64>;
}

pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditRepository for AuditStore {
    async fn list_recent(&self) -> AppResult<Vec<AuditEntry>> {
        let models = AuditEntity::find()
            .order_by_desc(audit_log::Column::CreatedAt)
            .order_by_desc(audit_log::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(AuditEntry::from).collect())
    }

    async fn count_action_containing(&self, fragment: &str) -> AppResult<u64> {
        let count = AuditEntity::find()
            .filter(audit_log::Column::Action.contains(fragment))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

/// Transaction-aware audit log writer.
pub struct TxAuditRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAuditRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn append(&self, entry: NewAuditEntry) -> AppResult<AuditEntry> {
        let active_model = ActiveModel {
            actor_id: Set(entry.actor_id),
            entity_type: Set(entry.entity_type),
            entity_id: Set(entry.entity_id),
            action: Set(entry.action),
            details: Set(entry.details),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        tracing::info!(
            audit_id = model.id,
            action = %model.action,
            entity_id = ?model.entity_id,
            "Audit entry appended"
        );
        Ok(AuditEntry::from(model))
    }
}
