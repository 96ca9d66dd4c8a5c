//! S3-based object storage operations
mod error;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::{presigning::PresigningConfig, primitives::ByteStream, Client as S3Client};
use bytes::Bytes;

pub use error::{ObjectStoreError, ObjectStoreResult};

/// Object storage client for S3 operations.
///
/// Bucket names are supplied per call: the pipeline writes grants against the
/// originals bucket, reads from whatever bucket a notification names, and
/// publishes variants to the processed bucket, all through one client.
pub struct ObjectStore {
    s3_client: Arc<S3Client>,
}

impl ObjectStore {
    /// Creates a new object store from a pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }

    /// Downloads the full body of an object into memory.
    ///
    /// # Errors
    ///
    /// Returns `ObjectStoreError::S3` when the GET request fails
    /// Returns `ObjectStoreError::ByteStream` when the body stream is cut short
    pub async fn download(&self, bucket: &str, key: &str) -> ObjectStoreResult<Bytes> {
        let response = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ObjectStoreError::S3(format!("Failed to get s3://{bucket}/{key}: {e}")))?;

        let body = response.body.collect().await.map_err(|e| {
            ObjectStoreError::ByteStream(format!("Failed to read s3://{bucket}/{key}: {e}"))
        })?;

        Ok(body.into_bytes())
    }

    /// Uploads an object with its content type and cache directive.
    ///
    /// An existing object under the same key is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ObjectStoreError::S3` when the PUT request fails
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        cache_control: &str,
    ) -> ObjectStoreResult<()> {
        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .cache_control(cache_control)
            .send()
            .await
            .map_err(|e| ObjectStoreError::S3(format!("Failed to put s3://{bucket}/{key}: {e}")))?;

        Ok(())
    }

    /// Generates a presigned URL for a PUT of one object.
    ///
    /// The signature covers the bucket, the key, and the content type, so the
    /// uploader must send the same content type or the request is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ObjectStoreError::Config` when the presigning config is invalid
    /// Returns `ObjectStoreError::S3` when signing fails
    pub async fn presigned_upload_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> ObjectStoreResult<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            ObjectStoreError::Config(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                ObjectStoreError::S3(format!("Failed to presign upload for s3://{bucket}/{key}: {e}"))
            })?;

        Ok(presigned_request.uri().to_string())
    }
}
