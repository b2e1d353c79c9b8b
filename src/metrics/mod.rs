//! Basic metrics instrumentation for the form and its HTTP transport.
//!
//! Counters for keystrokes, submissions and receipt service requests. The
//! collector is cheap to clone; clones share the same counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for the verification form.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Keystrokes suppressed by the phone filter
    keystrokes_rejected_total: Arc<AtomicU64>,

    /// Submissions that passed phone validation
    submissions_accepted_total: Arc<AtomicU64>,

    /// Submissions blocked by phone validation
    submissions_blocked_total: Arc<AtomicU64>,

    /// Receipt PDFs downloaded
    receipts_downloaded_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            keystrokes_rejected_total: Arc::new(AtomicU64::new(0)),
            submissions_accepted_total: Arc::new(AtomicU64::new(0)),
            submissions_blocked_total: Arc::new(AtomicU64::new(0)),
            receipts_downloaded_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a keystroke the phone filter suppressed.
    pub fn record_keystroke_rejected(&self) {
        self.keystrokes_rejected_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submission that passed validation.
    pub fn record_submission_accepted(&self) {
        self.submissions_accepted_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submission blocked by validation.
    pub fn record_submission_blocked(&self) {
        self.submissions_blocked_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a downloaded receipt.
    pub fn record_receipt_downloaded(&self) {
        self.receipts_downloaded_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total suppressed keystrokes.
    pub fn keystrokes_rejected_total(&self) -> u64 {
        self.keystrokes_rejected_total.load(Ordering::Relaxed)
    }

    /// Get total accepted submissions.
    pub fn submissions_accepted_total(&self) -> u64 {
        self.submissions_accepted_total.load(Ordering::Relaxed)
    }

    /// Get total blocked submissions.
    pub fn submissions_blocked_total(&self) -> u64 {
        self.submissions_blocked_total.load(Ordering::Relaxed)
    }

    /// Get total downloaded receipts.
    pub fn receipts_downloaded_total(&self) -> u64 {
        self.receipts_downloaded_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.http_requests_total.store(0, Ordering::Relaxed);
        self.http_errors_total.store(0, Ordering::Relaxed);
        self.http_duration_total_ms.store(0, Ordering::Relaxed);
        self.keystrokes_rejected_total.store(0, Ordering::Relaxed);
        self.submissions_accepted_total.store(0, Ordering::Relaxed);
        self.submissions_blocked_total.store(0, Ordering::Relaxed);
        self.receipts_downloaded_total.store(0, Ordering::Relaxed);
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            keystrokes_rejected_total: self.keystrokes_rejected_total(),
            submissions_accepted_total: self.submissions_accepted_total(),
            submissions_blocked_total: self.submissions_blocked_total(),
            receipts_downloaded_total: self.receipts_downloaded_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub keystrokes_rejected_total: u64,
    pub submissions_accepted_total: u64,
    pub submissions_blocked_total: u64,
    pub receipts_downloaded_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
