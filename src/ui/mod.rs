//! UI capabilities the form talks to.
//!
//! The form never touches a concrete widget toolkit. It is handed
//! implementations of these traits instead: a modal for the loading overlay,
//! an alert presenter for error and success messages, and a clipboard. The
//! in-memory implementations here back the MCP server and the tests.

pub mod alerts;
pub mod clipboard;
pub mod modal;

pub use alerts::{Alert, AlertBoard, AlertKind};
pub use clipboard::MemoryClipboard;
pub use modal::LoadingModal;

use crate::error::FormResult;

/// A modal overlay that can be shown with a message and hidden again.
pub trait ModalController: Send + Sync {
    /// Show the modal with `message` as its body text.
    fn show(&self, message: &str);

    /// Hide the modal. Hiding a hidden modal is a no-op.
    fn hide(&self);
}

/// Presents transient alert messages to the user.
pub trait AlertPresenter: Send + Sync {
    /// Show an error message.
    fn show_error(&self, message: &str);

    /// Show a success message.
    fn show_success(&self, message: &str);
}

/// Somewhere text can be copied to.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Clipboard` when the clipboard cannot be written.
    fn write_text(&self, text: &str) -> FormResult<()>;
}
