#[allow(clippy::module_inception)]
pub mod auth;

pub use auth::{Auth, is_safe_next, login_url};
