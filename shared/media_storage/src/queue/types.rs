use serde::{Deserialize, Serialize};

/// An S3 object-creation event as delivered to the queue.
///
/// Only the fields the pipeline consumes are modeled; the remaining event
/// metadata (region, event time, request parameters) is ignored on
/// deserialization. An event without a `Records` array is an empty batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadEvent {
    /// Event records, one per created object
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

/// One record of an upload event, describing a single created object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Event name, e.g. `ObjectCreated:Put`
    #[serde(default)]
    pub event_name: Option<String>,
    /// The bucket and object this record refers to
    pub s3: S3Entity,
}

/// The S3 portion of an event record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct S3Entity {
    /// Bucket the object was created in
    pub bucket: BucketRef,
    /// The created object
    pub object: ObjectRef,
}

/// Bucket reference within an event record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketRef {
    /// Bucket name
    pub name: String,
}

/// Object reference within an event record.
///
/// The key arrives URL-encoded, with spaces as `+`, exactly as S3 emits it.
/// Decoding is the consumer's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectRef {
    /// URL-encoded object key
    pub key: String,
}

/// Wrapper for queue messages with metadata
#[derive(Debug, Clone)]
pub struct QueueMessage<T> {
    /// The message body
    pub body: T,
    /// Receipt handle for acknowledging the message
    pub receipt_handle: String,
    /// Message ID
    pub message_id: String,
}

/// Configuration for queue operations
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Queue URL
    pub queue_url: String,
    /// Default maximum number of messages to retrieve
    pub default_max_messages: i32,
    /// Default visibility timeout for messages (in seconds)
    pub default_visibility_timeout: i32,
    /// Default wait time for long polling
    pub default_wait_time_seconds: i32,
}
