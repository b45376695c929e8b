//! Audit log entries for account creation and administrative mutations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::profile::{describe_changes, EntrepreneurProfile, ExplorerProfile, FieldChange};
use super::user::{User, UserRole};
use crate::config::{
    ACTION_CREATION, ACTION_DELETION, ACTION_EDIT, ENTITY_ENTREPRENEUR, ENTITY_EXPLORER,
    ENTITY_USER,
};

/// A persisted audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub id: i32,
    pub actor_id: Option<i32>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// An audit row waiting to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub actor_id: Option<i32>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub action: String,
    pub details: String,
}

impl NewAuditEntry {
    fn new(entity_type: &str, entity_id: i32, action: String, details: String) -> Self {
        Self {
            actor_id: None,
            entity_type: Some(entity_type.to_string()),
            entity_id: Some(entity_id),
            action,
            details,
        }
    }

    /// Record who performed the action.
    pub fn by(mut self, actor_id: Option<i32>) -> Self {
        self.actor_id = actor_id;
        self
    }

    pub fn user_created(user_id: i32, username: &str, role: &UserRole) -> Self {
        Self::new(
            ENTITY_USER,
            user_id,
            ACTION_CREATION.to_string(),
            format!("Se creó el usuario '{}' con rol '{}'.", username, role),
        )
    }

    pub fn explorer_edited(profile: &ExplorerProfile, changes: &[FieldChange]) -> Self {
        Self::new(
            ENTITY_EXPLORER,
            profile.id,
            format!("{} de {}", ACTION_EDIT, ENTITY_EXPLORER),
            format!(
                "Se editaron los datos del explorador '{}'. Cambios: {}",
                profile.display_name(),
                describe_changes(changes)
            ),
        )
    }

    pub fn entrepreneur_edited(profile: &EntrepreneurProfile, changes: &[FieldChange]) -> Self {
        Self::new(
            ENTITY_ENTREPRENEUR,
            profile.id,
            format!("{} de {}", ACTION_EDIT, ENTITY_ENTREPRENEUR),
            format!(
                "Se editaron los datos del emprendimiento '{}'. Cambios: {}",
                profile.business_name,
                describe_changes(changes)
            ),
        )
    }

    pub fn explorer_deleted(user: &User, profile: &ExplorerProfile) -> Self {
        Self::new(
            ENTITY_USER,
            user.id,
            ACTION_DELETION.to_string(),
            format!(
                "Se eliminó el usuario \"{}\" asociado al explorador \"{}\".",
                user.username,
                profile.display_name()
            ),
        )
    }

    pub fn entrepreneur_deleted(user: &User, profile: &EntrepreneurProfile) -> Self {
        Self::new(
            ENTITY_USER,
            user.id,
            ACTION_DELETION.to_string(),
            format!(
                "Se eliminó el usuario \"{}\" asociado al emprendimiento \"{}\".",
                user.username, profile.business_name
            ),
        )
    }
}
