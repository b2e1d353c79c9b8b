//! The receipt verification form.
//!
//! A headless model of the page form: the live-masked phone field, the
//! controller that gates submission and handles shortcuts, the download
//! button's loading state and session storage.

pub mod button;
pub mod controller;
pub mod phone_field;
pub mod session;

pub use button::{LoadingButton, LOADING_LABEL};
pub use controller::{
    FormCapabilities, KeyTarget, KeystrokeReport, ReceiptForm, Shortcut, VERIFYING_MESSAGE,
};
pub use phone_field::{FieldState, PhoneField};
pub use session::{MemorySessionStore, SessionStore, VERIFIED_PHONE_KEY};
