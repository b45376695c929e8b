//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod audit_log;
pub mod entrepreneur;
pub mod explorer;
pub mod user;
