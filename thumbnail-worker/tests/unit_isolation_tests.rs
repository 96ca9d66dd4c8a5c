//! Failure isolation tests for the derivative pipeline
//!
//! These run fully offline: the AWS clients point at an unroutable local
//! endpoint with retries disabled, so every retrieval fails fast and
//! deterministically.

mod utils;

use std::sync::Arc;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use futures::future::join_all;
use media_storage::{derivative::DerivativeStorage, object_store::ObjectStore};
use thumbnail_worker::worker::{pipeline::DerivativePipeline, ProcessError};
use utils::event_record;

/// Nothing listens on port 1, so every request is refused immediately
const UNROUTABLE_ENDPOINT: &str = "http://127.0.0.1:1";

async fn unreachable_pipeline() -> DerivativePipeline {
    let credentials = Credentials::from_keys("test", "test", None);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(UNROUTABLE_ENDPOINT)
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .retry_config(RetryConfig::disabled())
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(2))
                .build(),
        )
        .load()
        .await;

    let object_store = Arc::new(ObjectStore::new(Arc::new(S3Client::new(&config))));
    let derivative_storage = Arc::new(DerivativeStorage::new(
        Arc::new(DynamoDbClient::new(&config)),
        "unreachable-table".to_string(),
    ));

    DerivativePipeline::new(
        object_store,
        derivative_storage,
        "unreachable-processed".to_string(),
        vec![200, 800],
    )
}

#[tokio::test]
async fn retrieval_failure_aborts_the_unit() {
    let pipeline = unreachable_pipeline().await;
    let record = event_record("missing-bucket", "2026-08-23/gone.jpg");

    let result = pipeline.process_record(&record).await;

    assert!(matches!(result, Err(ProcessError::Retrieval(_))));
}

#[tokio::test]
async fn sibling_units_settle_independently() {
    let pipeline = unreachable_pipeline().await;
    let records = vec![
        event_record("bucket-a", "2026-08-23/first.jpg"),
        event_record("bucket-b", "2026-08-23/second.png"),
        event_record("bucket-c", "2026-08-23/third.jpg"),
    ];

    // Same join the event processor uses: every future settles on its own
    let results = join_all(records.iter().map(|r| pipeline.process_record(r))).await;

    assert_eq!(results.len(), records.len());
    for result in results {
        assert!(matches!(result, Err(ProcessError::Retrieval(_))));
    }
}

#[tokio::test]
async fn invalid_key_fails_without_touching_the_store() {
    let pipeline = unreachable_pipeline().await;
    // %FF is not valid UTF-8 after percent-decoding
    let record = event_record("bucket-a", "2026-08-23/%FF.jpg");

    let result = pipeline.process_record(&record).await;

    assert!(matches!(result, Err(ProcessError::InvalidKey(_))));
}

#[tokio::test]
async fn mixed_failures_are_captured_per_unit() {
    let pipeline = unreachable_pipeline().await;
    let records = vec![
        event_record("bucket-a", "2026-08-23/%FF.jpg"),
        event_record("bucket-b", "2026-08-23/plain.jpg"),
    ];

    let results = join_all(records.iter().map(|r| pipeline.process_record(r))).await;

    assert!(matches!(results[0], Err(ProcessError::InvalidKey(_))));
    assert!(matches!(results[1], Err(ProcessError::Retrieval(_))));
}
