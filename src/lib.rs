pub mod config;
pub mod controllers;
pub mod database;
pub mod entities;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod requests;
pub mod router;
pub mod security;
pub mod server;
pub mod services;
pub mod session;
pub mod views;

// Testing utilities, available to integration tests (in-memory SQLite)
#[cfg(feature = "sqlite")]
pub mod testing;

// Re-export commonly used types for convenience
pub use error::Error;
pub use metrics::{AppMetrics, MetricsMiddleware};
pub use middlewares::v1::auth::Auth;
pub use security::{PasswordHasher, SecurityHeadersMiddleware};
pub use server::AppState;
pub use views::Views;
