//! Phone formatting, cleaning and validation.
//!
//! The free functions here are the reusable surface other callers rely on for
//! consistent phone display: [`clean_phone`] strips a string down to its ASCII
//! digits and [`format_phone`] applies the `(DDD) DDD-DDDD` mask. The
//! [`PhoneNumber`] value object wraps a string that passed [`is_valid_phone`].

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fewest digits a submittable phone may carry.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Most digits a submittable phone may carry.
pub const MAX_PHONE_DIGITS: usize = 15;

/// Remove every character that is not an ASCII digit.
pub fn clean_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format raw input as a masked phone display string.
///
/// The input is always stripped to digits first, so feeding an already
/// formatted value back in yields the same display.
///
/// | digits | output           |
/// |--------|------------------|
/// | 0..3   | digits unchanged |
/// | 3..6   | `(DDD) ddd`      |
/// | 6..    | `(DDD) DDD-dddd` |
///
/// A separator is only written when the group after it has at least one
/// digit. Digits beyond the tenth run on after the last group, so no digit
/// is ever dropped from the display.
///
/// # Example
///
/// ```
/// use receipt_form::domain::format_phone;
///
/// assert_eq!(format_phone("5551234567"), "(555) 123-4567");
/// assert_eq!(format_phone("555123"), "(555) 123");
/// assert_eq!(format_phone("55"), "55");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits = clean_phone(raw);

    // Only ASCII digits remain, so byte offsets are char offsets.
    let len = digits.len();
    if len < 3 {
        return digits;
    }

    let mut formatted = String::with_capacity(14);
    formatted.push('(');
    formatted.push_str(&digits[..3]);
    formatted.push(')');

    if len > 3 {
        formatted.push(' ');
        formatted.push_str(&digits[3..len.min(6)]);
    }

    if len > 6 {
        formatted.push('-');
        formatted.push_str(&digits[6..]);
    }

    formatted
}

/// Whether `raw` carries an acceptable number of digits for submission.
///
/// Only the digit count is checked (7 to 15 inclusive). Country formats,
/// area codes and checksums are not.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// A type-safe wrapper for a phone number accepted by the verification form.
///
/// # Example
///
/// ```
/// use receipt_form::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("(555) 123-4567").unwrap();
/// assert_eq!(phone.digits_only(), "5551234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the digit count.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the phone has fewer than 7
    /// or more than 15 digits.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Get the phone number as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        clean_phone(&self.0)
    }

    /// Get the masked display form.
    pub fn formatted(&self) -> String {
        format_phone(&self.0)
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
