use receipt_form::ui::{AlertPresenter, ModalController};
use std::sync::{Arc, Mutex};

/// Modal that records every show and hide call.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingModal {
    events: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in order, as `show:<message>` or `hide`.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ModalController for RecordingModal {
    fn show(&self, message: &str) {
        self.events.lock().unwrap().push(format!("show:{}", message));
    }

    fn hide(&self) {
        self.events.lock().unwrap().push("hide".to_string());
    }
}

/// Alert presenter that records messages without expiring them.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingAlerts {
    errors: Arc<Mutex<Vec<String>>>,
    successes: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

impl AlertPresenter for RecordingAlerts {
    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn show_success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }
}
