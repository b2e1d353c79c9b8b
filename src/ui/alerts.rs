//! In-memory alert board with time-based dismissal.
//!
//! Alerts expire after a per-kind TTL, the same way entries fall out of a
//! timed cache: expiry is checked on read and nothing runs in the background.
//! Only one error alert is shown at a time; a new error while one is visible
//! replaces its message. Success toasts stack.

use super::AlertPresenter;
use crate::config::Config;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// What an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Error,
    Success,
}

/// A visible alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone)]
struct AlertEntry {
    alert: Alert,
    shown_at: Instant,
    ttl: Duration,
}

impl AlertEntry {
    fn is_live(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) < self.ttl
    }
}

/// Thread-safe alert board implementing [`AlertPresenter`].
///
/// Clones share the same alerts.
#[derive(Debug, Clone)]
pub struct AlertBoard {
    entries: Arc<RwLock<Vec<AlertEntry>>>,
    next_id: Arc<AtomicU64>,
    error_ttl: Duration,
    success_ttl: Duration,
}

impl AlertBoard {
    /// Create a board with explicit lifetimes for error and success alerts.
    pub fn new(error_ttl: Duration, success_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            error_ttl,
            success_ttl,
        }
    }

    /// Create a board using the configured alert lifetimes.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.error_alert_ttl(), config.success_alert_ttl())
    }

    /// Alerts that have not yet expired, oldest first.
    pub fn active(&self) -> Vec<Alert> {
        let now = Instant::now();

        if let Ok(entries) = self.entries.read() {
            return entries
                .iter()
                .filter(|e| e.is_live(now))
                .map(|e| e.alert.clone())
                .collect();
        }

        Vec::new()
    }

    /// The visible error alert, if any.
    pub fn current_error(&self) -> Option<Alert> {
        self.active()
            .into_iter()
            .find(|a| a.kind == AlertKind::Error)
    }

    /// Dismiss an alert by ID, as the close button would.
    ///
    /// Returns `true` if the alert was still visible.
    pub fn dismiss(&self, id: u64) -> bool {
        let now = Instant::now();

        if let Ok(mut entries) = self.entries.write() {
            if let Some(pos) = entries.iter().position(|e| e.alert.id == id) {
                let entry = entries.remove(pos);
                return entry.is_live(now);
            }
        }

        false
    }

    /// Remove all alerts.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Drop expired alerts from memory.
    ///
    /// Expired alerts are already hidden from [`active`](Self::active); this
    /// only frees them.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|e| e.is_live(now));
        }
    }

    /// Number of stored alerts, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the board stores no alerts at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, entries: &mut Vec<AlertEntry>, kind: AlertKind, message: &str, ttl: Duration) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        entries.push(AlertEntry {
            alert: Alert {
                id,
                kind,
                message: message.to_string(),
            },
            shown_at: Instant::now(),
            ttl,
        });
    }
}

impl AlertPresenter for AlertBoard {
    fn show_error(&self, message: &str) {
        let now = Instant::now();
        tracing::debug!(message = %message, "Showing error alert");

        if let Ok(mut entries) = self.entries.write() {
            // Reuse a visible error; its dismissal deadline is unchanged
            if let Some(existing) = entries
                .iter_mut()
                .find(|e| e.alert.kind == AlertKind::Error && e.is_live(now))
            {
                existing.alert.message = message.to_string();
                return;
            }

            self.push(&mut entries, AlertKind::Error, message, self.error_ttl);
        }
    }

    fn show_success(&self, message: &str) {
        tracing::debug!(message = %message, "Showing success alert");

        if let Ok(mut entries) = self.entries.write() {
            self.push(&mut entries, AlertKind::Success, message, self.success_ttl);
        }
    }
}

impl Default for AlertBoard {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
