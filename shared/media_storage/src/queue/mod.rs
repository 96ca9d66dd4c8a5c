//! Queue operations for the image derivative pipeline
//!
//! Object-creation notifications arrive as S3 event JSON on a standard SQS
//! queue. This module owns the event wire types and the queue client used by
//! the thumbnail worker.

/// Error types for queue operations
pub mod error;
/// Common types for queue operations
pub mod types;
/// Upload event queue functionality
pub mod upload_events;

pub use error::{QueueError, QueueResult};
pub use types::{BucketRef, EventRecord, ObjectRef, QueueConfig, QueueMessage, S3Entity, UploadEvent};
pub use upload_events::UploadEventQueue;
