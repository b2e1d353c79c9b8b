//! Test doubles shared by the integration tests.

mod mock_receipt_client;
mod recording_ui;

#[allow(unused_imports)]
pub use mock_receipt_client::MockReceiptClient;
#[allow(unused_imports)]
pub use recording_ui::{RecordingAlerts, RecordingModal};
