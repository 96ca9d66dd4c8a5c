//! Upload event queue operations
//!
//! The originals bucket publishes object-creation notifications to a standard
//! SQS queue; the thumbnail worker polls them here. Messages are acknowledged
//! only after processing, so unacknowledged work is redelivered once the
//! visibility timeout lapses.

use crate::queue::{
    error::QueueResult,
    types::{QueueConfig, QueueMessage, UploadEvent},
};
use aws_sdk_sqs::Client as SqsClient;
use std::sync::Arc;

/// Upload event queue carrying object-creation notifications
pub struct UploadEventQueue {
    sqs_client: Arc<SqsClient>,
    config: QueueConfig,
}

impl UploadEventQueue {
    /// Creates a new upload event queue
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `config` - Queue configuration including URL and default parameters
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, config: QueueConfig) -> Self {
        Self { sqs_client, config }
    }

    /// Sends an upload event to the queue.
    ///
    /// In deployment S3 publishes events directly; this path exists for local
    /// runs and tests that stand in for the bucket notification.
    ///
    /// # Returns
    ///
    /// The message ID if successful
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if serialization or the send operation fails
    pub async fn send_event(&self, event: &UploadEvent) -> QueueResult<String> {
        let body = serde_json::to_string(event)?;

        let result = self
            .sqs_client
            .send_message()
            .queue_url(&self.config.queue_url)
            .message_body(body)
            .send()
            .await?;

        Ok(result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default())
    }

    /// Polls upload events from the queue.
    ///
    /// Message bodies that do not parse as S3 event JSON are logged and
    /// dropped from the result; they stay on the queue until their visibility
    /// timeout expires.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the poll operation fails
    pub async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage<UploadEvent>>> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.default_max_messages)
            .visibility_timeout(self.config.default_visibility_timeout)
            .wait_time_seconds(self.config.default_wait_time_seconds)
            .send()
            .await?;

        let messages = result
            .messages()
            .iter()
            .filter_map(|msg| {
                let body = msg.body()?;
                let receipt_handle = msg.receipt_handle()?.to_string();
                let message_id = msg.message_id()?.to_string();

                match serde_json::from_str::<UploadEvent>(body) {
                    Ok(parsed) => {
                        tracing::debug!(
                            "Received upload event with {} record(s)",
                            parsed.records.len()
                        );
                        Some(QueueMessage {
                            body: parsed,
                            receipt_handle,
                            message_id,
                        })
                    }
                    Err(e) => {
                        tracing::error!("Failed to deserialize upload event: {}", e);
                        None
                    }
                }
            })
            .collect();

        Ok(messages)
    }

    /// Acknowledges receipt of a message by deleting it from the queue
    ///
    /// # Arguments
    ///
    /// * `receipt_handle` - The receipt handle from the received message
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the acknowledgment fails
    pub async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }
}
