//! Domain layer - Core business entities and logic
//!
//! Accounts, role profiles, audit entries and dashboard aggregates,
//! independent of storage and transport.

pub mod audit;
pub mod password;
pub mod profile;
pub mod registration;
pub mod report;
pub mod user;

pub use audit::{AuditEntry, NewAuditEntry};
pub use password::Password;
pub use profile::{
    Account, EntrepreneurPatch, EntrepreneurProfile, ExplorerPatch, ExplorerProfile, FieldChange,
    NewEntrepreneur, NewExplorer, PersonalDetails, Profile,
};
pub use registration::Registration;
pub use report::{AdminDashboard, Histogram, RoleBreakdown};
pub use user::{NewUser, User, UserRole};
