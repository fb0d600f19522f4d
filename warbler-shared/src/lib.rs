//! # Warbler Shared Library
//!
//! This crate contains the types and business logic shared between the
//! Warbler API server and its supporting tools.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, access tokens, credential extraction, and
//!   the request authorization middleware
//! - `models`: Database models and their CRUD operations
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Warbler shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
