#![allow(unused_imports, dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use media_storage::{
    derivative::DerivativeStorage,
    object_store::ObjectStore,
    queue::{BucketRef, EventRecord, ObjectRef, S3Entity},
};
use thumbnail_worker::worker::pipeline::DerivativePipeline;
use uuid::Uuid;

/// LocalStack endpoint used by the end-to-end suite
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Setup test environment variables and tracing
pub fn setup_test_env() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// AWS config pointed at LocalStack with hardcoded credentials
pub async fn localstack_config() -> aws_config::SdkConfig {
    let credentials = Credentials::from_keys("test", "test", None);
    aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .load()
        .await
}

/// End-to-end test context with uniquely named LocalStack resources
pub struct TestContext {
    pub s3_client: Arc<S3Client>,
    pub dynamodb_client: Arc<DynamoDbClient>,
    pub object_store: Arc<ObjectStore>,
    pub derivative_storage: Arc<DerivativeStorage>,
    pub originals_bucket: String,
    pub processed_bucket: String,
    pub meta_table: String,
}

impl TestContext {
    /// Creates fresh buckets and a fresh derivatives table per test
    pub async fn new() -> Self {
        setup_test_env();

        let config = localstack_config().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();
        let s3_client = Arc::new(S3Client::from_conf(s3_config));
        let dynamodb_client = Arc::new(DynamoDbClient::new(&config));

        let originals_bucket = format!("test-originals-{}", Uuid::new_v4());
        let processed_bucket = format!("test-processed-{}", Uuid::new_v4());
        for bucket in [&originals_bucket, &processed_bucket] {
            s3_client
                .create_bucket()
                .bucket(bucket)
                .send()
                .await
                .expect("Failed to create test bucket");
        }

        let meta_table = Self::create_derivatives_table(&dynamodb_client).await;

        let object_store = Arc::new(ObjectStore::new(s3_client.clone()));
        let derivative_storage = Arc::new(DerivativeStorage::new(
            dynamodb_client.clone(),
            meta_table.clone(),
        ));

        Self {
            s3_client,
            dynamodb_client,
            object_store,
            derivative_storage,
            originals_bucket,
            processed_bucket,
            meta_table,
        }
    }

    /// Creates a test derivatives table with `id` as the primary key
    async fn create_derivatives_table(client: &DynamoDbClient) -> String {
        let table_name = format!("test-media-derivatives-{}", Uuid::new_v4());

        client
            .create_table()
            .table_name(&table_name)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("id")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("id")
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .expect("Failed to create test table");

        table_name
    }

    /// Builds a pipeline over this context's buckets and table
    pub fn pipeline(&self, variant_widths: Vec<u32>) -> DerivativePipeline {
        DerivativePipeline::new(
            Arc::clone(&self.object_store),
            Arc::clone(&self.derivative_storage),
            self.processed_bucket.clone(),
            variant_widths,
        )
    }

    /// Uploads an encoded original under the given key
    pub async fn upload_original(&self, key: &str, body: Bytes, content_type: &str) {
        self.s3_client
            .put_object()
            .bucket(&self.originals_bucket)
            .key(key)
            .body(body.into())
            .content_type(content_type)
            .send()
            .await
            .expect("Failed to upload test original");
    }

    /// Downloads an object from the processed bucket
    pub async fn download_variant(&self, key: &str) -> Bytes {
        let response = self
            .s3_client
            .get_object()
            .bucket(&self.processed_bucket)
            .key(key)
            .send()
            .await
            .expect("Variant object exists");
        response
            .body
            .collect()
            .await
            .expect("Variant body collects")
            .into_bytes()
    }

    /// Fetches a raw derivative record item by id
    pub async fn get_record_item(
        &self,
        id: &str,
    ) -> Option<std::collections::HashMap<String, aws_sdk_dynamodb::types::AttributeValue>> {
        self.dynamodb_client
            .get_item()
            .table_name(&self.meta_table)
            .key("id", aws_sdk_dynamodb::types::AttributeValue::S(id.to_string()))
            .send()
            .await
            .expect("GetItem succeeds")
            .item
    }
}

/// Encodes a solid test image in the given format.
///
/// RGB8 keeps the helper valid for both PNG and JPEG output.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Bytes {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([40, 120, 200])));
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Test image encodes");
    Bytes::from(buffer)
}

/// Builds an upload event record for a bucket/key pair
pub fn event_record(bucket: &str, key: &str) -> EventRecord {
    EventRecord {
        event_name: Some("ObjectCreated:Put".to_string()),
        s3: S3Entity {
            bucket: BucketRef {
                name: bucket.to_string(),
            },
            object: ObjectRef {
                key: key.to_string(),
            },
        },
    }
}
