//! Async wrapper around the synchronous ReceiptClient.
//!
//! This module provides an async interface to the synchronous ReceiptClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use super::{HealthStatus, ReceiptClient};
use crate::error::{ReceiptApiError, ReceiptApiResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Async receipt service operations.
#[async_trait]
pub trait AsyncReceiptClient: Send + Sync {
    async fn health(&self) -> ReceiptApiResult<HealthStatus>;
    async fn verify(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<String>;
    async fn download(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<Vec<u8>>;
}

/// Async wrapper around synchronous ReceiptClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncReceiptClientImpl {
    client: Arc<ReceiptClient>,
}

impl AsyncReceiptClientImpl {
    pub fn new(client: ReceiptClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> ReceiptApiError {
    ReceiptApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncReceiptClient for AsyncReceiptClientImpl {
    async fn health(&self) -> ReceiptApiResult<HealthStatus> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.health())
            .await
            .map_err(join_error)?
    }

    async fn verify(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<String> {
        let client = self.client.clone();
        let receipt_id = receipt_id.to_string();
        let phone_number = phone_number.to_string();

        tokio::task::spawn_blocking(move || client.verify(&receipt_id, &phone_number))
            .await
            .map_err(join_error)?
    }

    async fn download(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<Vec<u8>> {
        let client = self.client.clone();
        let receipt_id = receipt_id.to_string();
        let phone_number = phone_number.to_string();

        tokio::task::spawn_blocking(move || client.download(&receipt_id, &phone_number))
            .await
            .map_err(join_error)?
    }
}
