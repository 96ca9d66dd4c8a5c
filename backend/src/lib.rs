//! Upload API for the image derivative pipeline

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Handler routes
pub mod routes;

/// HTTP server setup
pub mod server;

/// Environment configuration and error handling
pub mod types;

/// Upload grant issuance
pub mod uploads;
