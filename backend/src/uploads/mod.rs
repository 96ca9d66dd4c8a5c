//! Upload grant issuance
//!
//! A grant is a short-lived presigned PUT URL bound to a freshly derived
//! object key in the originals bucket. The key, not the URL, is the identity
//! clients keep: every variant and metadata record produced downstream is
//! addressed by it.

use std::sync::Arc;
use std::time::Duration;

use media_storage::{
    keys,
    object_store::{ObjectStore, ObjectStoreResult},
};

/// Content type assumed when the client does not request one
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// An issued upload grant
#[derive(Debug, Clone)]
pub struct UploadGrant {
    /// Presigned PUT URL for the original
    pub upload_url: String,
    /// Object key the original will be stored under
    pub object_key: String,
}

/// Issues upload grants against the originals bucket
pub struct UploadAuthorizer {
    object_store: Arc<ObjectStore>,
    originals_bucket: String,
    grant_expiry_secs: u64,
}

impl UploadAuthorizer {
    /// Creates a new upload authorizer
    ///
    /// # Arguments
    ///
    /// * `object_store` - Pre-configured object store client
    /// * `originals_bucket` - Bucket the grants are scoped to
    /// * `grant_expiry_secs` - Validity window of issued URLs in seconds
    #[must_use]
    pub const fn new(
        object_store: Arc<ObjectStore>,
        originals_bucket: String,
        grant_expiry_secs: u64,
    ) -> Self {
        Self {
            object_store,
            originals_bucket,
            grant_expiry_secs,
        }
    }

    /// Issues a grant for one upload of the given content type.
    ///
    /// Every call derives a fresh object key; issuing a grant does not create
    /// an object, so unused grants leave no trace.
    ///
    /// # Errors
    ///
    /// Returns `ObjectStoreError` if presigning fails
    pub async fn issue(&self, content_type: &str) -> ObjectStoreResult<UploadGrant> {
        let extension = keys::extension_for(content_type);
        let object_key = keys::source_key(&extension);

        let upload_url = self
            .object_store
            .presigned_upload_url(
                &self.originals_bucket,
                &object_key,
                content_type,
                Duration::from_secs(self.grant_expiry_secs),
            )
            .await?;

        Ok(UploadGrant {
            upload_url,
            object_key,
        })
    }
}
