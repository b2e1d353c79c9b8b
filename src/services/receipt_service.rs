//! Receipt service layer.
//!
//! Verification and download of receipts. Receipt IDs and phone numbers are
//! validated before any request is sent.

use crate::client::{AsyncReceiptClient, HealthStatus};
use crate::domain::{PhoneNumber, ReceiptId};
use crate::error::ReceiptApiResult;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A receipt page returned after verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedReceipt {
    pub receipt_id: ReceiptId,
    pub page_html: String,
}

/// A receipt PDF written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadedReceipt {
    pub receipt_id: ReceiptId,
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Receipt service trait for business operations.
#[async_trait]
pub trait ReceiptService: Send + Sync {
    /// Check that the receipt service is reachable.
    async fn health(&self) -> ReceiptApiResult<HealthStatus>;

    /// Submit a phone number to verify ownership of a receipt.
    async fn verify(&self, receipt_id: &str, phone: &str) -> ReceiptApiResult<VerifiedReceipt>;

    /// Download a receipt PDF into `dir`.
    async fn download_to(
        &self,
        receipt_id: &str,
        phone: &str,
        dir: &Path,
    ) -> ReceiptApiResult<DownloadedReceipt>;
}

/// Default implementation of ReceiptService.
pub struct ReceiptServiceImpl {
    client: Arc<dyn AsyncReceiptClient>,
}

impl ReceiptServiceImpl {
    /// Create a new receipt service.
    pub fn new(client: Arc<dyn AsyncReceiptClient>) -> Self {
        Self { client }
    }
}

/// File name a receipt is saved under: `receipt_{id}.pdf`, with characters
/// that could escape the download directory replaced by `_`.
pub fn receipt_file_name(receipt_id: &ReceiptId) -> String {
    let safe: String = receipt_id
        .as_str()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    format!("receipt_{}.pdf", safe)
}

#[async_trait]
impl ReceiptService for ReceiptServiceImpl {
    async fn health(&self) -> ReceiptApiResult<HealthStatus> {
        self.client.health().await
    }

    async fn verify(&self, receipt_id: &str, phone: &str) -> ReceiptApiResult<VerifiedReceipt> {
        let receipt_id = ReceiptId::new(receipt_id)?;
        let phone = PhoneNumber::new(phone)?;

        tracing::info!(receipt_id = %receipt_id, "Verifying receipt");
        let page_html = self
            .client
            .verify(receipt_id.as_str(), phone.as_str())
            .await?;

        Ok(VerifiedReceipt {
            receipt_id,
            page_html,
        })
    }

    async fn download_to(
        &self,
        receipt_id: &str,
        phone: &str,
        dir: &Path,
    ) -> ReceiptApiResult<DownloadedReceipt> {
        let receipt_id = ReceiptId::new(receipt_id)?;
        let phone = PhoneNumber::new(phone)?;

        tracing::info!(receipt_id = %receipt_id, "Downloading receipt");
        let bytes = self
            .client
            .download(receipt_id.as_str(), phone.as_str())
            .await?;

        let path = dir.join(receipt_file_name(&receipt_id));
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "Receipt saved");

        Ok(DownloadedReceipt {
            receipt_id,
            path,
            size_bytes: bytes.len(),
        })
    }
}
