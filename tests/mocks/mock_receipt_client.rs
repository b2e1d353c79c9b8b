use async_trait::async_trait;
use receipt_form::client::{AsyncReceiptClient, HealthStatus};
use receipt_form::error::{ReceiptApiError, ReceiptApiResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct StoredReceipt {
    phone: String,
    pdf: Vec<u8>,
}

/// Mock receipt client for testing.
///
/// Holds receipts in memory keyed by ID, answers verification and download
/// like the real service does, and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockReceiptClient {
    receipts: Arc<Mutex<HashMap<String, StoredReceipt>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    last_phone: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockReceiptClient {
    /// Create a new empty MockReceiptClient.
    pub fn new() -> Self {
        Self {
            receipts: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            last_phone: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a receipt owned by `phone` whose PDF is `pdf`.
    pub fn add_receipt(&self, receipt_id: &str, phone: &str, pdf: &[u8]) {
        self.receipts.lock().unwrap().insert(
            receipt_id.to_string(),
            StoredReceipt {
                phone: phone.to_string(),
                pdf: pdf.to_vec(),
            },
        );
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// The phone number sent with the most recent request.
    pub fn last_phone(&self) -> Option<String> {
        self.last_phone.lock().unwrap().clone()
    }

    fn increment_call_count(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn lookup(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<StoredReceipt> {
        *self.last_phone.lock().unwrap() = Some(phone_number.to_string());

        let receipts = self.receipts.lock().unwrap();
        let receipt = receipts
            .get(receipt_id)
            .ok_or_else(|| ReceiptApiError::NotFound("Receipt not found".to_string()))?;

        let digits = |s: &str| s.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
        if digits(&receipt.phone) != digits(phone_number) {
            return Err(ReceiptApiError::PhoneMismatch);
        }

        Ok(receipt.clone())
    }
}

impl Default for MockReceiptClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AsyncReceiptClient for MockReceiptClient {
    async fn health(&self) -> ReceiptApiResult<HealthStatus> {
        self.increment_call_count("health");
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: "receipt-service".to_string(),
        })
    }

    async fn verify(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<String> {
        self.increment_call_count("verify");
        match self.lookup(receipt_id, phone_number) {
            Ok(_) => Ok(format!("<h1>Receipt {}</h1>", receipt_id)),
            Err(ReceiptApiError::PhoneMismatch) => {
                Ok("<p>Phone number does not match our records</p>".to_string())
            }
            Err(e) => Err(e),
        }
    }

    async fn download(&self, receipt_id: &str, phone_number: &str) -> ReceiptApiResult<Vec<u8>> {
        self.increment_call_count("download");
        self.lookup(receipt_id, phone_number).map(|r| r.pdf)
    }
}
