//! Chía business directory - accounts, moderation and dashboards for a
//! local-business directory.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, profiles, audit entries and dashboard aggregates
//! - **services**: Registration, login, moderation and reporting use cases
//! - **infra**: Database, migrations, repositories, sessions, Redis
//! - **api**: HTTP handlers, session middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Create or update the schema
//! cargo run -- migrate up
//!
//! # Start the server
//! cargo run -- serve --port 3000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::{Cache, Database};
