//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod moderation_handler;
pub mod page_handler;

pub use auth_handler::auth_routes;
pub use dashboard_handler::dashboard_routes;
pub use moderation_handler::moderation_routes;
pub use page_handler::page_routes;
