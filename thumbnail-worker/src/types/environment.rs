//! Environment configuration for different deployment stages

use std::{env, time::Duration};

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use media_storage::queue::QueueConfig;
use tracing::Level;

/// Widths rendered when `VARIANT_WIDTHS` is unset or empty
pub const DEFAULT_VARIANT_WIDTHS: [u32; 2] = [200, 800];

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable,
    /// defaulting to development when it is unset
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Returns the bucket variants are published to
    ///
    /// # Panics
    ///
    /// Panics if the `PROCESSED_BUCKET` environment variable is not set
    /// outside of development
    #[must_use]
    pub fn processed_bucket(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("PROCESSED_BUCKET").expect("PROCESSED_BUCKET environment variable is not set")
            }
            Self::Development => {
                env::var("PROCESSED_BUCKET").unwrap_or_else(|_| "media-processed".to_string())
            }
        }
    }

    /// Returns the DynamoDB table derivative records are written to
    ///
    /// # Panics
    ///
    /// Panics if the `META_TABLE` environment variable is not set outside of
    /// development
    #[must_use]
    pub fn meta_table(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("META_TABLE").expect("META_TABLE environment variable is not set")
            }
            Self::Development => {
                env::var("META_TABLE").unwrap_or_else(|_| "media-derivatives".to_string())
            }
        }
    }

    /// Returns the upload event queue configuration
    ///
    /// # Panics
    ///
    /// Panics if the `UPLOAD_EVENTS_QUEUE_URL` environment variable is not set
    /// in production/staging
    #[must_use]
    pub fn upload_event_queue_config(&self) -> QueueConfig {
        let queue_url = match self {
            Self::Production | Self::Staging => env::var("UPLOAD_EVENTS_QUEUE_URL")
                .expect("UPLOAD_EVENTS_QUEUE_URL environment variable is not set"),
            Self::Development => {
                "http://localhost:4566/000000000000/upload-events-queue".to_string()
            }
        };

        QueueConfig {
            queue_url,
            default_max_messages: 10,
            default_visibility_timeout: 120, // Rendering a batch of originals can take a while
            default_wait_time_seconds: 20,   // Enable long polling by default
        }
    }

    /// Returns the default number of event processors for this environment
    #[must_use]
    pub const fn default_worker_count(&self) -> usize {
        match self {
            Self::Production => 8,
            Self::Staging => 4,
            Self::Development => 2,
        }
    }

    /// Returns the number of event processors, overridable via `WORKER_COUNT`
    #[must_use]
    pub fn worker_count(&self) -> usize {
        env::var("WORKER_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| self.default_worker_count())
    }

    /// Returns the event channel capacity, overridable via `CHANNEL_CAPACITY`
    #[must_use]
    pub fn channel_capacity(&self) -> usize {
        env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| self.worker_count() * 2)
    }

    /// Default tracing level for the environment, overridable via
    /// `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}

/// Target widths read from the `VARIANT_WIDTHS` environment variable.
///
/// The value is a comma-separated integer list; entries that are empty,
/// non-numeric, or zero are dropped. An unset or empty variable falls back to
/// the default list. A set variable whose entries are all invalid yields an
/// empty list, not the default.
#[must_use]
pub fn variant_widths() -> Vec<u32> {
    let configured = env::var("VARIANT_WIDTHS").unwrap_or_default();
    if configured.is_empty() {
        return DEFAULT_VARIANT_WIDTHS.to_vec();
    }

    configured
        .split(',')
        .filter_map(|entry| entry.trim().parse::<u32>().ok())
        .filter(|&width| width > 0)
        .collect()
}
