//! Error types for object store operations

use thiserror::Error;

/// Result type for object store operations
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Errors that can occur during object store operations
#[derive(Error, Debug)]
pub enum ObjectStoreError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3(String),

    /// Streamed object body could not be read
    #[error("Object body error: {0}")]
    ByteStream(String),

    /// Presigning configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
