//! Security tests module
//!
//! - SQL injection prevention
//! - XSS (Cross-Site Scripting) prevention in rendered forms and pages

pub mod xss_test;
