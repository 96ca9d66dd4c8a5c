//! Storage services for the image derivative pipeline
//!
//! This crate provides the AWS-facing clients shared between the upload API
//! and the thumbnail worker: S3 object storage, DynamoDB derivative records,
//! object key derivation, and the SQS upload event queue.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

pub mod derivative;
pub mod keys;
pub mod object_store;
pub mod queue;
