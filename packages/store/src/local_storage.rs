//! # `localStorage` hint store: browser-side persistence
//!
//! [`LocalStorageStore`] is the [`HintStore`] used on the web platform. Keys are
//! prefixed with `"grow-guides:"` so they don't collide with anything else
//! served from the same origin.
//!
//! Storage errors (private browsing, quota, disabled storage) are logged and
//! otherwise ignored. A missing hint degrades to "unknown", which the UI handles.

use crate::hints::{check_write, HintStore};

const PREFIX: &str = "grow-guides:";

#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl HintStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(&format!("{PREFIX}{key}")).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            check_write("set", key, storage.set_item(&format!("{PREFIX}{key}"), value));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            check_write("remove", key, storage.remove_item(&format!("{PREFIX}{key}")));
        }
    }
}
