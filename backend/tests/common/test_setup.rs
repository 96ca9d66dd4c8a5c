use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use axum::{body::Body, http::Request, response::Response, Extension, Router};
use backend::{routes, types::Environment, uploads::UploadAuthorizer};
use media_storage::object_store::ObjectStore;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

/// Endpoint URLs are signed against LocalStack; router tests never send
/// a request to it
pub const TEST_ENDPOINT: &str = "http://localhost:4566";

/// Bucket upload grants are scoped to in tests
pub const TEST_BUCKET: &str = "media-originals-test";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Base test setup with the full router and its dependencies
pub struct TestSetup {
    pub router: Router,
    pub environment: Environment,
    pub s3_client: Arc<S3Client>,
}

impl TestSetup {
    pub async fn new(presign_expiry_override: Option<u64>) -> Self {
        Self::with_environment(Environment::Development {
            presign_expiry_override,
        })
        .await
    }

    pub async fn with_environment(environment: Environment) -> Self {
        setup_test_env();

        // Hardcoded credentials keep URL signing fully local
        let credentials = Credentials::from_keys(
            "test", // AWS_ACCESS_KEY_ID
            "test", // AWS_SECRET_ACCESS_KEY
            None,   // no session token
        );
        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(TEST_ENDPOINT)
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();
        let s3_client = Arc::new(S3Client::from_conf(s3_config));

        let object_store = Arc::new(ObjectStore::new(s3_client.clone()));
        let authorizer = Arc::new(UploadAuthorizer::new(
            object_store,
            TEST_BUCKET.to_string(),
            environment.presigned_url_expiry_secs(),
        ));

        let mut openapi = aide::openapi::OpenApi::default();
        let router = routes::handler(&environment)
            .finish_api(&mut openapi)
            .layer(Extension(openapi))
            .layer(Extension(authorizer))
            // Same CORS policy the server runs with
            .layer(CorsLayer::permissive());

        Self {
            router,
            environment,
            s3_client,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// Sends a POST without any body or content type, like a minimal client
    pub async fn send_empty_post_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
