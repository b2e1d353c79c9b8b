//! Per-session key/value storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Session key holding the last phone number that passed validation.
pub const VERIFIED_PHONE_KEY: &str = "verifiedPhone";

/// Key/value storage scoped to the current session.
pub trait SessionStore: Send + Sync {
    fn set_item(&self, key: &str, value: &str);
    fn get_item(&self, key: &str) -> Option<String>;
    fn remove_item(&self, key: &str);
}

/// Session storage held in memory. Clones share the same items.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok().and_then(|items| items.get(key).cloned())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemorySessionStore::new();
        assert!(store.get_item(VERIFIED_PHONE_KEY).is_none());

        store.set_item(VERIFIED_PHONE_KEY, "(555) 123-4567");
        assert_eq!(
            store.get_item(VERIFIED_PHONE_KEY).as_deref(),
            Some("(555) 123-4567")
        );

        store.remove_item(VERIFIED_PHONE_KEY);
        assert!(store.get_item(VERIFIED_PHONE_KEY).is_none());
    }
}
