//! Verification form controller.
//!
//! Holds the live phone field and drives the injected UI capabilities:
//! keystroke filtering and masking, the submit-time phone gate, the Enter and
//! Escape shortcuts, the download button's loading state and copying the
//! receipt ID.

use super::button::LoadingButton;
use super::phone_field::{FieldState, PhoneField};
use super::session::{SessionStore, VERIFIED_PHONE_KEY};
use crate::config::Config;
use crate::domain::{is_valid_phone, Key, PhoneNumber};
use crate::error::{FormError, FormResult};
use crate::metrics::Metrics;
use crate::ui::{AlertPresenter, Clipboard, ModalController};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Loading modal text while a submission is being verified.
pub const VERIFYING_MESSAGE: &str = "Verifying your information...";

/// Success toast after copying a receipt ID.
pub const COPY_SUCCESS_MESSAGE: &str = "Receipt ID copied to clipboard";

/// Error alert when copying a receipt ID fails.
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy receipt ID";

/// Initial label of the download button.
pub const DOWNLOAD_LABEL: &str = "Download PDF";

/// The UI capabilities a form is wired to.
#[derive(Clone)]
pub struct FormCapabilities {
    pub modal: Arc<dyn ModalController>,
    pub alerts: Arc<dyn AlertPresenter>,
    pub clipboard: Arc<dyn Clipboard>,
    pub session: Arc<dyn SessionStore>,
}

/// Where a key-down event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    PhoneField,
    Elsewhere,
}

/// What a key-down shortcut did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortcut {
    /// Enter in the phone field submitted the form.
    Submitted(FormResult<PhoneNumber>),
    /// Escape closed open modals.
    ModalClosed,
    /// No shortcut matched.
    None,
}

/// Outcome of one key typed into the phone field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeystrokeReport {
    pub key: String,
    /// Whether the key was accepted, either by the field or as a shortcut.
    pub allowed: bool,
    pub value: String,
    pub state: FieldState,
    /// `Some(true)` if this key submitted the form and it was accepted,
    /// `Some(false)` if the submission was blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<bool>,
}

/// The receipt verification form.
pub struct ReceiptForm {
    field: PhoneField,
    capabilities: FormCapabilities,
    download_button: LoadingButton,
    download_reset: Duration,
    metrics: Metrics,
}

impl ReceiptForm {
    /// Create a form wired to `capabilities`, with the download reset delay
    /// taken from `config`.
    pub fn new(capabilities: FormCapabilities, config: &Config) -> Self {
        Self {
            field: PhoneField::new(),
            capabilities,
            download_button: LoadingButton::new(DOWNLOAD_LABEL),
            download_reset: config.download_reset_delay(),
            metrics: Metrics::new(),
        }
    }

    /// Share a metrics collector with the form.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn field(&self) -> &PhoneField {
        &self.field
    }

    pub fn download_button(&self) -> &LoadingButton {
        &self.download_button
    }

    /// A key press in the phone field. Returns `false` if it was suppressed.
    pub fn key_press(&mut self, key: &Key) -> bool {
        let allowed = self.field.press(key);
        if !allowed {
            self.metrics.record_keystroke_rejected();
        }
        allowed
    }

    /// Replace the phone field's value, as a paste would.
    pub fn input(&mut self, raw: &str) {
        self.field.set_value(raw);
    }

    /// A key-down anywhere on the page.
    ///
    /// Enter in the phone field submits the form. Escape hides open modals.
    pub fn key_down(&mut self, key: &Key, target: KeyTarget) -> Shortcut {
        match (key, target) {
            (Key::Enter, KeyTarget::PhoneField) => Shortcut::Submitted(self.submit()),
            (Key::Escape, _) => {
                self.capabilities.modal.hide();
                Shortcut::ModalClosed
            }
            _ => Shortcut::None,
        }
    }

    /// A key typed while the phone field has focus: key-down shortcuts
    /// first, then the key press itself. Keys consumed as non-character
    /// shortcuts (Escape) never produce a key press.
    pub fn type_key(&mut self, key: &Key) -> KeystrokeReport {
        self.field.focus();

        let (submitted, allowed) = match self.key_down(key, KeyTarget::PhoneField) {
            Shortcut::Submitted(result) => (Some(result.is_ok()), self.key_press(key)),
            Shortcut::ModalClosed => (None, true),
            Shortcut::None => (None, self.key_press(key)),
        };

        KeystrokeReport {
            key: key.to_string(),
            allowed,
            value: self.field.value().to_string(),
            state: self.field.state(),
            submitted,
        }
    }

    /// Validate the phone field and start verification.
    ///
    /// On success the phone is stored in the session under
    /// [`VERIFIED_PHONE_KEY`] and the loading modal is shown.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidPhoneFormat` when the phone does not carry
    /// 7 to 15 digits. The error alert is shown and the field focused;
    /// nothing else changes, so the user can correct it and resubmit.
    pub fn submit(&mut self) -> FormResult<PhoneNumber> {
        let phone = self.field.value().trim().to_string();

        if !is_valid_phone(&phone) {
            tracing::warn!(
                digits = phone.chars().filter(|c| c.is_ascii_digit()).count(),
                "Submission blocked: invalid phone number"
            );
            self.metrics.record_submission_blocked();
            self.capabilities
                .alerts
                .show_error(&FormError::InvalidPhoneFormat.to_string());
            self.field.focus();
            return Err(FormError::InvalidPhoneFormat);
        }

        let phone = PhoneNumber::new(phone).map_err(|_| FormError::InvalidPhoneFormat)?;

        self.capabilities
            .session
            .set_item(VERIFIED_PHONE_KEY, phone.as_str());
        self.capabilities.modal.show(VERIFYING_MESSAGE);
        self.metrics.record_submission_accepted();
        tracing::info!("Phone number accepted, verifying receipt");

        Ok(phone)
    }

    /// Verification finished; hide the loading modal.
    pub fn finish_verification(&self) {
        self.capabilities.modal.hide();
    }

    /// The phone stored by the last accepted submission.
    pub fn verified_phone(&self) -> Option<String> {
        self.capabilities.session.get_item(VERIFIED_PHONE_KEY)
    }

    /// Put the download button into its loading state and schedule the reset.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn click_download(&self) -> JoinHandle<()> {
        self.download_button.set_loading(true);
        self.download_button.reset_after(self.download_reset)
    }

    /// Copy a receipt ID to the clipboard and report the result to the user.
    pub fn copy_receipt_id(&self, receipt_id: &str) -> FormResult<()> {
        match self.capabilities.clipboard.write_text(receipt_id) {
            Ok(()) => {
                self.capabilities.alerts.show_success(COPY_SUCCESS_MESSAGE);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy receipt ID");
                self.capabilities.alerts.show_error(COPY_FAILURE_MESSAGE);
                Err(e)
            }
        }
    }
}
