//! Helpers shared by unit and integration tests.

pub mod browser;
pub mod instance;
pub mod setup;

pub use browser::{Browser, body_text, location};
