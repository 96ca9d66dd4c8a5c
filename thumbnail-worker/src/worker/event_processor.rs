//! Event processor loop: one upload event at a time, units fanned out

use std::sync::Arc;

use futures::future::join_all;
use media_storage::queue::{QueueMessage, UploadEvent, UploadEventQueue};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::pipeline::DerivativePipeline;

/// `EventProcessor` consumes upload events from the worker channel
pub struct EventProcessor {
    worker_id: usize,
    pipeline: Arc<DerivativePipeline>,
    queue: Arc<UploadEventQueue>,
}

impl EventProcessor {
    /// Creates a new `EventProcessor`
    #[must_use]
    pub const fn new(
        worker_id: usize,
        pipeline: Arc<DerivativePipeline>,
        queue: Arc<UploadEventQueue>,
    ) -> Self {
        Self {
            worker_id,
            pipeline,
            queue,
        }
    }

    /// Runs the event processor loop until shutdown or channel closure
    pub async fn run(
        &self,
        receiver: flume::Receiver<QueueMessage<UploadEvent>>,
        shutdown_token: CancellationToken,
    ) {
        info!("Event processor {} started", self.worker_id);

        loop {
            tokio::select! {
                () = shutdown_token.cancelled() => {
                    info!("Event processor {} received shutdown signal", self.worker_id);
                    break;
                }
                result = receiver.recv_async() => {
                    match result {
                        Ok(message) => self.process_event(message).await,
                        Err(flume::RecvError::Disconnected) => {
                            info!("Event channel closed for processor {}", self.worker_id);
                            break;
                        }
                    }
                }
            }
        }

        info!("Event processor {} stopped", self.worker_id);
    }

    /// Processes all records of one upload event concurrently.
    ///
    /// Each record is an independent unit: its error is captured on its own
    /// future and never cancels a sibling's in-flight work. The event is
    /// acknowledged only when every unit succeeded; otherwise it stays on the
    /// queue for redelivery, which is safe because reprocessing is
    /// idempotent.
    async fn process_event(&self, message: QueueMessage<UploadEvent>) {
        let records = message.body.records;

        let results = join_all(
            records
                .iter()
                .map(|record| self.pipeline.process_record(record)),
        )
        .await;

        let mut failed = 0_usize;
        for (record, result) in records.iter().zip(results) {
            if let Err(e) = result {
                failed += 1;
                error!(
                    "Worker {} failed to process s3://{}/{}: {}",
                    self.worker_id, record.s3.bucket.name, record.s3.object.key, e
                );
            }
        }

        if failed > 0 {
            warn!(
                "Worker {} leaving event {} on the queue: {failed}/{} unit(s) failed",
                self.worker_id,
                message.message_id,
                records.len()
            );
            return;
        }

        if let Err(e) = self.queue.ack_message(&message.receipt_handle).await {
            // The event will be redelivered and reprocessed idempotently
            error!(
                "Worker {} failed to ack event {}: {}",
                self.worker_id, message.message_id, e
            );
        }
    }
}
