//! Error types for derivative record storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use thiserror::Error;

/// Result type for derivative record storage operations
pub type DerivativeStorageResult<T> = Result<T, DerivativeStorageError>;

/// Errors that can occur during derivative record storage operations
#[derive(Error, Debug)]
pub enum DerivativeStorageError {
    /// Failed to write derivative record into Dynamo DB
    #[error("Failed to put derivative record into DynamoDB: {0}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Serialization error for `serde_dynamo`
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
