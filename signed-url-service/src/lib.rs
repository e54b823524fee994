//! Signed URL service
//!
//! Hands out short-lived V4 signed GET URLs for Cloud Storage objects,
//! authenticating with the ambient credentials of its runtime.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Ambient credential discovery and refresh
pub mod credentials;

/// HTTP routes
pub mod routes;

/// HTTP server
pub mod server;

/// Signed URL orchestration
pub mod signed_url;

/// V4 URL signing
pub mod signing;

/// Cloud Storage object lookups
pub mod storage;

/// Shared API types
pub mod types;
