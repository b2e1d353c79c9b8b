//! ReceiptId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest receipt ID accepted before any request is made.
pub const MAX_RECEIPT_ID_LEN: usize = 100;

/// A type-safe wrapper for receipt IDs.
///
/// Surrounding whitespace is trimmed. The remaining ID must be non-empty,
/// at most 100 characters and free of control characters.
///
/// # Example
///
/// ```
/// use receipt_form::domain::ReceiptId;
///
/// let id = ReceiptId::new(" RCP-2024-001 ").unwrap();
/// assert_eq!(id.as_str(), "RCP-2024-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Create a new ReceiptId.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` for blank input and
    /// `ValidationError::InvalidReceiptId` for overlong IDs or IDs containing
    /// control characters.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if id.chars().count() > MAX_RECEIPT_ID_LEN || id.chars().any(char::is_control) {
            return Err(ValidationError::InvalidReceiptId(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for ReceiptId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ReceiptId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ReceiptId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
