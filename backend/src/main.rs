use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use backend::{server, types::Environment, uploads::UploadAuthorizer};
use media_storage::object_store::ObjectStore;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    let env_filter = EnvFilter::builder()
        .with_default_directive(environment.tracing_level().into())
        .from_env_lossy();
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let object_store = Arc::new(ObjectStore::new(s3_client));
    let authorizer = Arc::new(UploadAuthorizer::new(
        object_store,
        environment.originals_bucket(),
        environment.presigned_url_expiry_secs(),
    ));

    server::start(environment, authorizer).await
}
