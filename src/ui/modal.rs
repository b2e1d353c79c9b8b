//! In-memory loading modal.

use super::ModalController;
use std::sync::{Arc, RwLock};

/// Body text shown when no message is given.
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Default)]
struct ModalState {
    visible: bool,
    message: Option<String>,
}

/// Loading overlay state. Clones share the same modal.
#[derive(Debug, Clone, Default)]
pub struct LoadingModal {
    state: Arc<RwLock<ModalState>>,
}

impl LoadingModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the modal with the default body text.
    pub fn show_default(&self) {
        self.show(DEFAULT_LOADING_MESSAGE);
    }

    pub fn is_visible(&self) -> bool {
        self.state.read().map(|s| s.visible).unwrap_or(false)
    }

    /// Body text of the last `show`, kept after hiding.
    pub fn message(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.message.clone())
    }
}

impl ModalController for LoadingModal {
    fn show(&self, message: &str) {
        tracing::debug!(message = %message, "Showing loading modal");
        if let Ok(mut state) = self.state.write() {
            state.visible = true;
            state.message = Some(message.to_string());
        }
    }

    fn hide(&self) {
        if let Ok(mut state) = self.state.write() {
            if state.visible {
                tracing::debug!("Hiding loading modal");
            }
            state.visible = false;
        }
    }
}
