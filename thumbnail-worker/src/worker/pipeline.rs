//! Per-unit derivative pipeline
//!
//! One unit is the processing of exactly one notified original: retrieve,
//! decode, render every configured width, publish each variant, then write
//! the derivative record. Every step of a unit is sequential; isolation
//! between units is the event processor's concern.

use std::sync::Arc;

use chrono::Utc;
use image::GenericImageView;
use media_storage::{
    derivative::{DerivativeRecord, DerivativeStorage, Variant},
    keys,
    object_store::ObjectStore,
    queue::EventRecord,
};
use percent_encoding::percent_decode_str;
use tracing::{debug, info};

use super::error::{ProcessError, ProcessResult};
use super::renderer;

/// Cache directive attached to published variants.
///
/// Variant keys are content-addressed by their source key, so a reprocessed
/// variant only ever changes to equivalent bytes; clients may cache forever.
pub const VARIANT_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Derivative pipeline for notified originals
pub struct DerivativePipeline {
    object_store: Arc<ObjectStore>,
    derivative_storage: Arc<DerivativeStorage>,
    processed_bucket: String,
    variant_widths: Vec<u32>,
}

impl DerivativePipeline {
    /// Creates a new derivative pipeline
    ///
    /// # Arguments
    ///
    /// * `object_store` - Shared S3 client wrapper
    /// * `derivative_storage` - Shared derivative record store
    /// * `processed_bucket` - Bucket variants are published to
    /// * `variant_widths` - Target widths, in configuration order
    #[must_use]
    pub const fn new(
        object_store: Arc<ObjectStore>,
        derivative_storage: Arc<DerivativeStorage>,
        processed_bucket: String,
        variant_widths: Vec<u32>,
    ) -> Self {
        Self {
            object_store,
            derivative_storage,
            processed_bucket,
            variant_widths,
        }
    }

    /// Processes one notified original end to end.
    ///
    /// Reprocessing the same key is safe: variant keys are deterministic, so
    /// a redelivered notification overwrites the variants and the record with
    /// equivalent content.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` naming the failed stage. Variants uploaded
    /// before the failure are not rolled back.
    pub async fn process_record(&self, record: &EventRecord) -> ProcessResult<()> {
        let bucket = &record.s3.bucket.name;
        let key = Self::decode_key(&record.s3.object.key)?;
        let content_type = keys::guess_content_type(&key);

        debug!("Processing s3://{bucket}/{key} as {content_type}");

        let body = self
            .object_store
            .download(bucket, &key)
            .await
            .map_err(ProcessError::Retrieval)?;

        let image = renderer::decode(&body).map_err(ProcessError::Decode)?;
        let format = renderer::target_format(&content_type);

        let mut variants = Vec::with_capacity(self.variant_widths.len());
        for &width in &self.variant_widths {
            let encoded = renderer::render(&image, width, format)
                .map_err(|source| ProcessError::Render { width, source })?;

            let variant_key = keys::variant_key(width, &key);
            self.object_store
                .upload(
                    &self.processed_bucket,
                    &variant_key,
                    encoded,
                    content_type.as_ref(),
                    VARIANT_CACHE_CONTROL,
                )
                .await
                .map_err(|source| ProcessError::Publish { width, source })?;

            variants.push(Variant {
                width,
                key: variant_key,
            });
        }

        let (width, height) = image.dimensions();
        self.derivative_storage
            .put(&DerivativeRecord {
                id: key.clone(),
                original_bucket: bucket.clone(),
                original_key: key.clone(),
                processed_bucket: self.processed_bucket.clone(),
                variants,
                width,
                height,
                created_at: Utc::now(),
            })
            .await
            .map_err(ProcessError::Record)?;

        info!(
            "Processed s3://{bucket}/{key}: {} variant(s) published",
            self.variant_widths.len()
        );

        Ok(())
    }

    /// Reconstructs the stored object key from its notified form.
    ///
    /// S3 event notifications URL-encode keys and render spaces as `+`.
    fn decode_key(notified_key: &str) -> ProcessResult<String> {
        let spaced = notified_key.replace('+', " ");
        percent_decode_str(&spaced)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(ProcessError::InvalidKey)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decode_key_passes_plain_keys_through() {
        let key = DerivativePipeline::decode_key("2026-08-23/0a1b2c3d.jpg").expect("decodes");
        assert_eq!(key, "2026-08-23/0a1b2c3d.jpg");
    }

    #[test]
    fn decode_key_reverses_s3_event_encoding() {
        let key =
            DerivativePipeline::decode_key("2026-08-23/summer+trip+%281%29.jpg").expect("decodes");
        assert_eq!(key, "2026-08-23/summer trip (1).jpg");
    }

    #[test]
    fn decode_key_rejects_invalid_utf8() {
        let result = DerivativePipeline::decode_key("2026-08-23/%FF.jpg");
        assert!(matches!(result, Err(ProcessError::InvalidKey(_))));
    }
}
