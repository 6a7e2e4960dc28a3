use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::hints::HintStore;

/// In-memory HintStore for testing and non-browser targets.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HintStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_values() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("user_email", "a@b.c");
        assert_eq!(other.get("user_email").as_deref(), Some("a@b.c"));

        other.remove("user_email");
        assert!(store.get("user_email").is_none());
    }
}
