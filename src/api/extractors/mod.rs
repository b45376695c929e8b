//! Custom extractors.

mod session_user;

pub use session_user::{AdminUser, CurrentUser};
