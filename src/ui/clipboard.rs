//! In-memory clipboard.

use super::Clipboard;
use crate::error::{FormError, FormResult};
use std::sync::{Arc, RwLock};

/// Clipboard held in memory. Clones share the same contents.
///
/// An unavailable clipboard rejects every write, which is how a denied
/// clipboard permission looks to the form.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    contents: Arc<RwLock<Option<String>>>,
    available: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: Arc::new(RwLock::new(None)),
            available: true,
        }
    }

    /// A clipboard that refuses writes.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.read().ok().and_then(|c| c.clone())
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> FormResult<()> {
        if !self.available {
            return Err(FormError::Clipboard("permission denied".to_string()));
        }

        let mut contents = self
            .contents
            .write()
            .map_err(|e| FormError::Clipboard(e.to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("RCP-1").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("RCP-1"));
    }

    #[test]
    fn test_unavailable_rejects_writes() {
        let clipboard = MemoryClipboard::unavailable();
        assert!(clipboard.write_text("RCP-1").is_err());
        assert!(clipboard.contents().is_none());
    }
}
