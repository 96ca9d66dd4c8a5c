use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use thumbnail_worker::health;
use thumbnail_worker::types::environment::Environment;
use thumbnail_worker::worker::ThumbnailWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    let env_filter = EnvFilter::builder()
        .with_default_directive(env.tracing_level().into())
        .from_env_lossy();
    match env {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    info!("Starting thumbnail worker in {:?} environment", env);

    // Create and start the worker
    match ThumbnailWorker::new(env).await {
        Ok(worker) => {
            // Get shutdown token for signal handling
            let shutdown_token = worker.shutdown_token();

            // Start health check server
            let health_shutdown = shutdown_token.clone();
            tokio::spawn(async move {
                if let Err(e) = health::start_health_server(health_shutdown).await {
                    error!("Health server error: {}", e);
                }
            });

            // Spawn signal handler
            let signal_shutdown = shutdown_token.clone();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Received Ctrl+C, initiating graceful shutdown...");
                        signal_shutdown.cancel();
                    }
                    Err(e) => {
                        error!("Failed to listen for Ctrl+C: {}", e);
                    }
                }
            });

            // Run the worker
            if let Err(e) = worker.start().await {
                error!("Worker error: {}", e);
                return Err(e);
            }
        }
        Err(e) => {
            error!("Failed to create worker: {}", e);
            return Err(e);
        }
    }

    info!("Thumbnail worker stopped");
    Ok(())
}
