//! Thumbnail worker for the image derivative pipeline
//!
//! Polls S3 object-creation events from SQS and renders resized variants of
//! every uploaded original, recording derivative metadata in DynamoDB.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod health;
pub mod types;
pub mod worker;
