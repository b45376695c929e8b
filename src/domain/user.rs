//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{
    ADMIN_DASHBOARD_PATH, ENTREPRENEUR_DASHBOARD_PATH, EXPLORER_DASHBOARD_PATH, ROLE_ADMIN,
    ROLE_ENTREPRENEUR, ROLE_EXPLORER,
};

/// User roles, persisted as their Spanish tag.
///
/// Tags outside the known three are kept verbatim in [`UserRole::Other`];
/// such accounts get no profile and land on the explorer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Explorer,
    Entrepreneur,
    Administrator,
    Other(String),
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Administrator)
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Explorer => ROLE_EXPLORER,
            UserRole::Entrepreneur => ROLE_ENTREPRENEUR,
            UserRole::Administrator => ROLE_ADMIN,
            UserRole::Other(tag) => tag,
        }
    }

    /// Landing page after login and for `/BotonLog`.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserRole::Administrator => ADMIN_DASHBOARD_PATH,
            UserRole::Entrepreneur => ENTREPRENEUR_DASHBOARD_PATH,
            _ => EXPLORER_DASHBOARD_PATH,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_EXPLORER => UserRole::Explorer,
            ROLE_ENTREPRENEUR => UserRole::Entrepreneur,
            ROLE_ADMIN => UserRole::Administrator,
            other => UserRole::Other(other.to_string()),
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data needed to insert a credential row. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_known_tags() {
        for tag in [ROLE_EXPLORER, ROLE_ENTREPRENEUR, ROLE_ADMIN] {
            let role = UserRole::from(tag);
            assert!(!matches!(role, UserRole::Other(_)));
            assert_eq!(String::from(role), tag);
        }
    }

    #[test]
    fn test_unknown_role_kept_verbatim() {
        let role = UserRole::from("Turista");
        assert_eq!(role, UserRole::Other("Turista".into()));
        assert_eq!(role.to_string(), "Turista");
    }

    #[test]
    fn test_role_tags_are_case_sensitive() {
        assert_eq!(
            UserRole::from("administrador"),
            UserRole::Other("administrador".into())
        );
    }

    #[test]
    fn test_dashboard_routing() {
        assert_eq!(UserRole::Administrator.dashboard_path(), "/admin_dashboard");
        assert_eq!(
            UserRole::Entrepreneur.dashboard_path(),
            "/emprendedor_dashboard"
        );
        assert_eq!(UserRole::Explorer.dashboard_path(), "/explorador_dashboard");
        assert_eq!(
            UserRole::Other("Turista".into()).dashboard_path(),
            "/explorador_dashboard"
        );
    }

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User {
            id: 1,
            username: "ana".into(),
            email: "ana@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: UserRole::Explorer,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "Explorador");
    }
}
