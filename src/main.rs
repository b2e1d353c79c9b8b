//! Receipt Form - Main entry point
//!
//! Runs the receipt form MCP server over stdio.

use anyhow::Result;
use receipt_form::client::{AsyncReceiptClient, AsyncReceiptClientImpl};
use receipt_form::services::{ReceiptService, ReceiptServiceImpl};
use receipt_form::{Config, Metrics, ReceiptClient, ReceiptFormServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();

    let receipt_service = match ReceiptClient::new(&config) {
        Ok(sync_client) => {
            info!(
                "Using receipt service at {}",
                config.receipt_api_url.as_deref().unwrap_or_default()
            );
            let client = Arc::new(AsyncReceiptClientImpl::new(
                sync_client.with_metrics(metrics.clone()),
            )) as Arc<dyn AsyncReceiptClient>;
            Some(Arc::new(ReceiptServiceImpl::new(client)) as Arc<dyn ReceiptService>)
        }
        Err(e) => {
            warn!("{}; verification and download tools are disabled", e);
            None
        }
    };

    let server = ReceiptFormServer::new(receipt_service, config, metrics);

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    receipt_form::server::run_server(server).await?;

    info!("Receipt form server shutdown complete");
    Ok(())
}
