//! Key-press tokens and the phone field's keystroke filter.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Printable characters the phone field accepts.
static ALLOWED_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s()\-]$").expect("Failed to compile phone keystroke regex"));

/// A single key-press token as delivered by the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Key {
    /// A printable character.
    Char(char),
    Backspace,
    Delete,
    Tab,
    Enter,
    Escape,
    /// Any other named key (`ArrowLeft`, `F5`, ...).
    Other(String),
}

impl Key {
    /// Parse a key token. Single characters become [`Key::Char`], known key
    /// names map to their variants and anything else is [`Key::Other`].
    pub fn parse(token: &str) -> Self {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }

        match token {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    /// Whether the phone field lets this key through.
    ///
    /// Digits, whitespace, `(`, `)` and `-` are allowed, as are the
    /// Backspace, Delete, Tab and Enter control keys.
    pub fn is_allowed(&self) -> bool {
        match self {
            Key::Char(c) => {
                let mut buf = [0u8; 4];
                ALLOWED_CHAR.is_match(c.encode_utf8(&mut buf))
            }
            Key::Backspace | Key::Delete | Key::Tab | Key::Enter => true,
            Key::Escape | Key::Other(_) => false,
        }
    }
}

impl From<&str> for Key {
    fn from(token: &str) -> Self {
        Key::parse(token)
    }
}

impl From<String> for Key {
    fn from(token: String) -> Self {
        Key::parse(&token)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Tab => write!(f, "Tab"),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Decide whether a key-press token may reach the phone field.
///
/// Returns `false` when the keystroke must be suppressed. Suppressing it is
/// the caller's job; this predicate has no side effects.
pub fn filter_keystroke(key: &str) -> bool {
    Key::parse(key).is_allowed()
}
