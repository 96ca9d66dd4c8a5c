//! Queue poller: long-polls SQS and feeds events into the worker channel

use std::sync::Arc;

use media_storage::queue::{QueueMessage, UploadEvent, UploadEventQueue};
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Delay before polling again after a receive error
const POLL_ERROR_DELAY: Duration = Duration::from_secs(5);

/// `QueuePoller` receives upload events and hands them to the processors
pub struct QueuePoller {
    queue: Arc<UploadEventQueue>,
    event_tx: flume::Sender<QueueMessage<UploadEvent>>,
    shutdown_token: CancellationToken,
}

impl QueuePoller {
    /// Creates a new `QueuePoller`
    #[must_use]
    pub const fn new(
        queue: Arc<UploadEventQueue>,
        event_tx: flume::Sender<QueueMessage<UploadEvent>>,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            queue,
            event_tx,
            shutdown_token,
        }
    }

    /// Runs the poll loop until shutdown.
    ///
    /// Receive errors are logged and retried after a delay; they never stop
    /// the worker. Events stay on the queue until a processor acknowledges
    /// them, so nothing is lost if the process dies mid-flight.
    ///
    /// # Errors
    ///
    /// Returns an error only when the worker channel is closed while
    /// processors are still expected to run.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Queue poller shutting down");
                    return Ok(());
                }
                result = self.queue.poll_messages() => match result {
                    Ok(messages) => self.dispatch(messages).await?,
                    Err(e) => {
                        error!("Failed to poll upload events: {e}, retrying in {POLL_ERROR_DELAY:?}");
                        tokio::select! {
                            () = self.shutdown_token.cancelled() => {
                                info!("Queue poller shutting down");
                                return Ok(());
                            }
                            () = sleep(POLL_ERROR_DELAY) => {}
                        }
                    }
                }
            }
        }
    }

    /// Forwards received events to the processors, blocking when all are busy
    async fn dispatch(&self, messages: Vec<QueueMessage<UploadEvent>>) -> anyhow::Result<()> {
        for message in messages {
            if self.event_tx.send_async(message).await.is_err() {
                error!("Event channel closed, stopping poller");
                anyhow::bail!("Event channel closed");
            }
        }
        Ok(())
    }
}
