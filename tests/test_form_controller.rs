//! Integration tests for the verification form controller, driven through
//! recording UI capabilities.

mod mocks;

use mocks::{RecordingAlerts, RecordingModal};
use receipt_form::config::Config;
use receipt_form::domain::Key;
use receipt_form::error::FormError;
use receipt_form::form::{
    FormCapabilities, KeyTarget, MemorySessionStore, ReceiptForm, SessionStore, Shortcut,
    LOADING_LABEL, VERIFIED_PHONE_KEY, VERIFYING_MESSAGE,
};
use receipt_form::metrics::Metrics;
use receipt_form::ui::MemoryClipboard;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    form: ReceiptForm,
    modal: RecordingModal,
    alerts: RecordingAlerts,
    session: MemorySessionStore,
    clipboard: MemoryClipboard,
    metrics: Metrics,
}

fn harness_with(clipboard: MemoryClipboard, config: &Config) -> Harness {
    let modal = RecordingModal::new();
    let alerts = RecordingAlerts::new();
    let session = MemorySessionStore::new();
    let metrics = Metrics::new();

    let capabilities = FormCapabilities {
        modal: Arc::new(modal.clone()),
        alerts: Arc::new(alerts.clone()),
        clipboard: Arc::new(clipboard.clone()),
        session: Arc::new(session.clone()),
    };

    Harness {
        form: ReceiptForm::new(capabilities, config).with_metrics(metrics.clone()),
        modal,
        alerts,
        session,
        clipboard,
        metrics,
    }
}

fn harness() -> Harness {
    harness_with(MemoryClipboard::new(), &Config::default())
}

#[test]
fn test_invalid_submission_is_blocked_once() {
    let mut h = harness();
    for c in "12345".chars() {
        h.form.key_press(&Key::Char(c));
    }

    let result = h.form.key_down(&Key::Enter, KeyTarget::PhoneField);

    assert_eq!(
        result,
        Shortcut::Submitted(Err(FormError::InvalidPhoneFormat))
    );
    assert_eq!(h.alerts.errors(), vec!["Please enter a valid phone number"]);
    assert!(h.modal.events().is_empty());
    assert!(h.session.get_item(VERIFIED_PHONE_KEY).is_none());
    assert!(h.form.field().is_focused());
    assert_eq!(h.metrics.submissions_blocked_total(), 1);
    assert_eq!(h.metrics.submissions_accepted_total(), 0);
}

#[test]
fn test_valid_submission_shows_modal_and_stores_phone() {
    let mut h = harness();
    h.form.input("555-123-4567");

    let phone = h.form.submit().unwrap();

    assert_eq!(phone.digits_only(), "5551234567");
    assert_eq!(h.modal.events(), vec![format!("show:{}", VERIFYING_MESSAGE)]);
    assert_eq!(
        h.session.get_item(VERIFIED_PHONE_KEY).as_deref(),
        Some("(555) 123-4567")
    );
    assert!(h.alerts.errors().is_empty());
    assert_eq!(h.metrics.submissions_accepted_total(), 1);
}

#[test]
fn test_escape_closes_modal_from_anywhere() {
    let mut h = harness();
    h.form.input("5551234567");
    h.form.submit().unwrap();

    assert_eq!(
        h.form.key_down(&Key::Escape, KeyTarget::Elsewhere),
        Shortcut::ModalClosed
    );
    assert_eq!(h.modal.events().last().map(String::as_str), Some("hide"));
}

#[test]
fn test_rejected_keystrokes_are_counted() {
    let mut h = harness();
    for token in ["5", "a", "5", "+", "5"] {
        h.form.type_key(&Key::parse(token));
    }

    assert_eq!(h.form.field().value(), "(555)");
    assert_eq!(h.metrics.keystrokes_rejected_total(), 2);
}

#[test]
fn test_copy_receipt_id_success() {
    let h = harness();
    h.form.copy_receipt_id("RCP-1001").unwrap();

    assert_eq!(h.clipboard.contents().as_deref(), Some("RCP-1001"));
    assert_eq!(h.alerts.successes(), vec!["Receipt ID copied to clipboard"]);
}

#[test]
fn test_copy_receipt_id_failure_shows_error() {
    let h = harness_with(MemoryClipboard::unavailable(), &Config::default());

    let result = h.form.copy_receipt_id("RCP-1001");

    assert!(matches!(result, Err(FormError::Clipboard(_))));
    assert_eq!(h.alerts.errors(), vec!["Failed to copy receipt ID"]);
    assert!(h.alerts.successes().is_empty());
}

#[tokio::test]
async fn test_download_button_resets_after_delay() {
    let config = Config {
        download_reset_ms: 20,
        ..Config::default()
    };
    let h = harness_with(MemoryClipboard::new(), &config);

    let reset = h.form.click_download();
    assert!(h.form.download_button().is_disabled());
    assert_eq!(h.form.download_button().label(), LOADING_LABEL);

    tokio::time::timeout(Duration::from_secs(2), reset)
        .await
        .expect("reset timed out")
        .unwrap();

    assert!(!h.form.download_button().is_disabled());
    assert_eq!(h.form.download_button().label(), "Download PDF");
}
