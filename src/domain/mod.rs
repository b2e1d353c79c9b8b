//! Domain value objects and the phone formatting core.
//!
//! Pure functions for cleaning, masking and validating phone input, the
//! keystroke filter used by the live phone field, and value objects that
//! are validated at construction time.

pub mod errors;
pub mod keystroke;
pub mod phone;
pub mod receipt_id;

pub use errors::ValidationError;
pub use keystroke::{filter_keystroke, Key};
pub use phone::{
    clean_phone, format_phone, is_valid_phone, PhoneNumber, MAX_PHONE_DIGITS,
    MIN_PHONE_DIGITS,
};
pub use receipt_id::ReceiptId;
