//! Audit log entity.

use sea_orm::entity::prelude::*;

use crate::domain::AuditEntry;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub actor_id: Option<i32>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub action: String,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuditEntry {
    fn from(model: Model) -> Self {
        AuditEntry {
            id: model.id,
            actor_id: model.actor_id,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            action: model.action,
            details: model.details,
            created_at: model.created_at,
        }
    }
}
