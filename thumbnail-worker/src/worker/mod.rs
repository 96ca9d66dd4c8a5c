pub mod error;
pub mod event_processor;
pub mod pipeline;
pub mod poller;
pub mod renderer;

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use media_storage::{
    derivative::DerivativeStorage,
    object_store::ObjectStore,
    queue::{QueueMessage, UploadEvent, UploadEventQueue},
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub use error::{ProcessError, ProcessResult};

use self::event_processor::EventProcessor;
use self::pipeline::DerivativePipeline;
use self::poller::QueuePoller;

use crate::types::environment::{self, Environment};

/// Message type that flows through the worker channel
pub type EventMessage = QueueMessage<UploadEvent>;

/// Thumbnail worker that manages event polling and processing
pub struct ThumbnailWorker {
    env: Environment,
    upload_event_queue: Arc<UploadEventQueue>,
    pipeline: Arc<DerivativePipeline>,
    shutdown_token: CancellationToken,
}

impl ThumbnailWorker {
    /// Creates a new thumbnail worker with process-scoped AWS clients
    ///
    /// # Errors
    ///
    /// Returns an error if AWS configuration cannot be loaded.
    pub async fn new(env: Environment) -> anyhow::Result<Self> {
        let aws_config = env.aws_config().await;

        let sqs_client = Arc::new(SqsClient::new(&aws_config));
        let upload_event_queue = Arc::new(UploadEventQueue::new(
            sqs_client,
            env.upload_event_queue_config(),
        ));

        let s3_client = Arc::new(S3Client::from_conf(env.s3_client_config().await));
        let object_store = Arc::new(ObjectStore::new(s3_client));

        let dynamodb_client = Arc::new(DynamoDbClient::new(&aws_config));
        let derivative_storage = Arc::new(DerivativeStorage::new(dynamodb_client, env.meta_table()));

        let pipeline = Arc::new(DerivativePipeline::new(
            object_store,
            derivative_storage,
            env.processed_bucket(),
            environment::variant_widths(),
        ));

        Ok(Self {
            env,
            upload_event_queue,
            pipeline,
            shutdown_token: CancellationToken::new(),
        })
    }

    /// Returns a clone of the shutdown token for external control
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Starts the worker and all components
    ///
    /// # Errors
    ///
    /// Returns an error if the poller fails or processor tasks panic.
    pub async fn start(self) -> anyhow::Result<()> {
        info!(
            "Starting thumbnail worker with {} event processors",
            self.env.worker_count()
        );

        let (event_tx, event_rx) = self.create_event_channel();
        let processor_handles = self.spawn_processors(&event_rx);
        drop(event_rx);

        self.run_poller(event_tx).await;
        self.shutdown_and_cleanup(processor_handles).await;

        Ok(())
    }

    /// Creates and logs the event channel
    fn create_event_channel(&self) -> (flume::Sender<EventMessage>, flume::Receiver<EventMessage>) {
        let (event_tx, event_rx) = flume::bounded::<EventMessage>(self.env.channel_capacity());
        info!(
            "Created flume channel with capacity: {}",
            self.env.channel_capacity()
        );
        (event_tx, event_rx)
    }

    /// Runs the queue poller and handles its result
    async fn run_poller(&self, event_tx: flume::Sender<EventMessage>) {
        let poller_result = QueuePoller::new(
            Arc::clone(&self.upload_event_queue),
            event_tx,
            self.shutdown_token.clone(),
        )
        .run()
        .await;

        if let Err(e) = poller_result {
            error!("Queue poller error: {}", e);
        }
    }

    /// Shuts down and cleans up all worker components
    async fn shutdown_and_cleanup(&self, processor_handles: Vec<JoinHandle<()>>) {
        self.shutdown_token.cancel();
        info!("Thumbnail worker shutdown initiated");

        for handle in processor_handles {
            if let Err(e) = handle.await {
                error!("Processor task error: {}", e);
            }
        }
        info!("All thumbnail worker components stopped");
    }

    /// Spawns event processor tasks
    fn spawn_processors(&self, receiver: &flume::Receiver<EventMessage>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        for i in 0..self.env.worker_count() {
            let processor = EventProcessor::new(
                i,
                Arc::clone(&self.pipeline),
                Arc::clone(&self.upload_event_queue),
            );
            let rx = receiver.clone();
            let shutdown_token = self.shutdown_token.clone();

            let handle = tokio::spawn(async move {
                processor.run(rx, shutdown_token).await;
            });

            handles.push(handle);
        }

        handles
    }
}
