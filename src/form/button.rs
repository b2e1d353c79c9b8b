//! Button with a loading state.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Label shown while a button is loading.
pub const LOADING_LABEL: &str = "Processing...";

#[derive(Debug)]
struct ButtonState {
    label: String,
    original_label: Option<String>,
    disabled: bool,
    loading: bool,
}

/// A button that can be put into a disabled "Processing..." state and
/// restored. Clones share the same button.
#[derive(Debug, Clone)]
pub struct LoadingButton {
    state: Arc<Mutex<ButtonState>>,
}

impl LoadingButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ButtonState {
                label: label.into(),
                original_label: None,
                disabled: false,
                loading: false,
            })),
        }
    }

    pub fn label(&self) -> String {
        self.state
            .lock()
            .map(|s| s.label.clone())
            .unwrap_or_default()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.lock().map(|s| s.disabled).unwrap_or(false)
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().map(|s| s.loading).unwrap_or(false)
    }

    /// Enter or leave the loading state.
    ///
    /// The label in place when loading first starts is remembered and
    /// restored when loading ends.
    pub fn set_loading(&self, loading: bool) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if loading {
            if state.original_label.is_none() {
                state.original_label = Some(state.label.clone());
            }
            state.label = LOADING_LABEL.to_string();
        } else if let Some(original) = state.original_label.clone() {
            state.label = original;
        }

        state.loading = loading;
        state.disabled = loading;
    }

    /// Leave the loading state after `delay` on the Tokio runtime.
    ///
    /// Fire-and-forget: dropping the handle does not cancel the reset.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn reset_after(&self, delay: Duration) -> JoinHandle<()> {
        let button = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            button.set_loading(false);
            tracing::debug!("Button loading state reset");
        })
    }
}
