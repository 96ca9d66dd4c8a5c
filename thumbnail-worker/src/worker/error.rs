use media_storage::{derivative::DerivativeStorageError, object_store::ObjectStoreError};
use thiserror::Error;

/// Result type alias for processing a single notified object
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that abort the processing of one notified object.
///
/// Each failure is confined to its own unit: sibling records in the same
/// event keep processing, and variants already published by the failing unit
/// are left in place.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Notified object key did not percent-decode to valid UTF-8
    #[error("Object key is not valid UTF-8 after decoding: {0}")]
    InvalidKey(std::str::Utf8Error),

    /// Original could not be retrieved from the source bucket
    #[error("Failed to retrieve original: {0}")]
    Retrieval(#[source] ObjectStoreError),

    /// Retrieved bytes could not be decoded as an image
    #[error("Failed to decode original: {0}")]
    Decode(#[source] image::ImageError),

    /// Resize or re-encode failed for one target width
    #[error("Failed to render {width}px variant: {source}")]
    Render {
        /// Target width that failed
        width: u32,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },

    /// Upload of one encoded variant failed
    #[error("Failed to publish {width}px variant: {source}")]
    Publish {
        /// Target width that failed
        width: u32,
        /// Underlying object store error
        #[source]
        source: ObjectStoreError,
    },

    /// Derivative record could not be written
    #[error("Failed to record derivative metadata: {0}")]
    Record(#[source] DerivativeStorageError),
}
