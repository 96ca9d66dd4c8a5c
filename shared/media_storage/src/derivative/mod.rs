//! Derivative record storage integration using Dynamo DB
//!
//! One record per processed original, keyed by the source object key,
//! linking the original to every variant produced from it.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::{DerivativeStorageError, DerivativeStorageResult};

/// One resized derivative of an original, at one target width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Target width in pixels
    pub width: u32,
    /// Object key of the variant in the processed bucket
    pub key: String,
}

/// Metadata record linking an original to its produced variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeRecord {
    /// Record id (Primary Key), equal to the source object key
    pub id: String,
    /// Bucket the original was uploaded to
    pub original_bucket: String,
    /// Object key of the original in that bucket
    pub original_key: String,
    /// Bucket the variants were published to
    pub processed_bucket: String,
    /// All produced variants, in configured width order
    pub variants: Vec<Variant>,
    /// Pixel width of the decoded original
    pub width: u32,
    /// Pixel height of the decoded original
    pub height: u32,
    /// When the record was assembled
    pub created_at: DateTime<Utc>,
}

/// Derivative record storage client for Dynamo DB operations
pub struct DerivativeStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl DerivativeStorage {
    /// Creates a new derivative record storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for derivative records
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Writes a derivative record, replacing any previous record for the
    /// same id.
    ///
    /// The write is unconditional: reprocessing an original overwrites its
    /// record with equivalent content, so redelivered notifications converge
    /// instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `DerivativeStorageError` if serialization or the Dynamo DB
    /// operation fails
    pub async fn put(&self, record: &DerivativeRecord) -> DerivativeStorageResult<()> {
        let item = serde_dynamo::to_item(record)
            .map_err(|e| DerivativeStorageError::SerializationError(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(())
    }
}
