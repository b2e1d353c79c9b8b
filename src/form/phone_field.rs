//! Live-masked phone input field.
//!
//! Each keystroke goes through three steps in a fixed order: the keystroke
//! filter decides whether the key reaches the field at all, the edit is
//! committed to the value, and the whole value is reformatted. Because
//! [`format_phone`] always strips to digits first, reformatting an already
//! masked value is harmless.
//!
//! The cursor is always at the end of the field.

use crate::domain::{format_phone, Key};
use serde::Serialize;

/// Observable state of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// No digits entered.
    Empty,
    /// At least one digit entered.
    NonEmpty,
}

/// A phone input field with live masking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneField {
    value: String,
    focused: bool,
}

impl PhoneField {
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> FieldState {
        if self.value.chars().any(|c| c.is_ascii_digit()) {
            FieldState::NonEmpty
        } else {
            FieldState::Empty
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replace the whole value (paste, autofill) and reformat it.
    pub fn set_value(&mut self, raw: &str) {
        self.value = format_phone(raw);
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Apply one key press.
    ///
    /// Returns `false` if the keystroke filter suppressed the key, in which
    /// case the value is untouched.
    pub fn press(&mut self, key: &Key) -> bool {
        if !key.is_allowed() {
            tracing::debug!(key = %key, "Keystroke suppressed");
            return false;
        }

        match key {
            Key::Char(c) => self.value.push(*c),
            Key::Backspace => {
                // Remove through the last digit so a trailing separator
                // cannot be re-added by the mask forever
                while let Some(c) = self.value.pop() {
                    if c.is_ascii_digit() {
                        break;
                    }
                }
            }
            // Forward delete at the end of the field removes nothing
            Key::Delete | Key::Tab | Key::Enter => {}
            Key::Escape | Key::Other(_) => return false,
        }

        self.value = format_phone(&self.value);
        true
    }

    /// Press each character of `text` in turn, returning how many were
    /// suppressed.
    pub fn type_text(&mut self, text: &str) -> usize {
        text.chars()
            .filter(|c| !self.press(&Key::Char(*c)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_digits_masks_progressively() {
        let mut field = PhoneField::new();
        let expected = [
            "5",
            "55",
            "(555)",
            "(555) 1",
            "(555) 12",
            "(555) 123",
            "(555) 123-4",
            "(555) 123-45",
            "(555) 123-456",
            "(555) 123-4567",
        ];

        for (c, want) in "5551234567".chars().zip(expected) {
            assert!(field.press(&Key::Char(c)));
            assert_eq!(field.value(), want);
        }
    }

    #[test]
    fn test_letters_suppressed() {
        let mut field = PhoneField::new();
        field.type_text("555");
        assert!(!field.press(&Key::Char('a')));
        assert_eq!(field.value(), "(555)");
    }

    #[test]
    fn test_separators_allowed_but_masked_away() {
        let mut field = PhoneField::new();
        assert_eq!(field.type_text("555-"), 0);
        assert_eq!(field.value(), "(555)");
    }

    #[test]
    fn test_backspace_removes_last_digit() {
        let mut field = PhoneField::new();
        field.type_text("5551");
        assert_eq!(field.value(), "(555) 1");

        field.press(&Key::Backspace);
        assert_eq!(field.value(), "(555)");

        field.press(&Key::Backspace);
        assert_eq!(field.value(), "55");

        field.press(&Key::Backspace);
        field.press(&Key::Backspace);
        assert_eq!(field.value(), "");
        assert_eq!(field.state(), FieldState::Empty);

        // Backspace on an empty field stays empty
        assert!(field.press(&Key::Backspace));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut field = PhoneField::new();
        field.type_text("555123");
        assert!(field.press(&Key::Delete));
        assert_eq!(field.value(), "(555) 123");
    }

    #[test]
    fn test_escape_suppressed() {
        let mut field = PhoneField::new();
        assert!(!field.press(&Key::Escape));
        assert!(!field.press(&Key::Other("ArrowLeft".to_string())));
    }

    #[test]
    fn test_state_cycles() {
        let mut field = PhoneField::new();
        assert_eq!(field.state(), FieldState::Empty);
        field.press(&Key::Char('1'));
        assert_eq!(field.state(), FieldState::NonEmpty);
        field.press(&Key::Backspace);
        assert_eq!(field.state(), FieldState::Empty);
        field.press(&Key::Char('2'));
        assert_eq!(field.state(), FieldState::NonEmpty);
    }

    #[test]
    fn test_set_value_reformats_paste() {
        let mut field = PhoneField::new();
        field.set_value("555.123.4567");
        assert_eq!(field.value(), "(555) 123-4567");
    }

    #[test]
    fn test_eleventh_digit_kept() {
        let mut field = PhoneField::new();
        field.type_text("55512345678");
        assert_eq!(field.value(), "(555) 123-45678");

        field.press(&Key::Backspace);
        assert_eq!(field.value(), "(555) 123-4567");
    }
}
