//! Small key/value flags kept in browser storage as UI hints.
//!
//! Only non-authoritative values live here (the last email used to log in and
//! whether that email was verified). The backend remains the source of truth.

/// Synchronous string key/value storage.
pub trait HintStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Log a failed storage write. Hints are best effort, so callers carry on.
#[cfg_attr(not(all(target_arch = "wasm32", feature = "web")), allow(dead_code))]
pub(crate) fn check_write<E: std::fmt::Debug>(
    action: &str,
    key: &str,
    result: Result<(), E>,
) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(action, key, ?error, "hint storage write failed");
            false
        }
    }
}

pub const USER_EMAIL_KEY: &str = "user_email";
pub const EMAIL_VERIFIED_KEY: &str = "is_email_verified";

/// Typed accessors over any [`HintStore`].
pub struct UiHints<S: HintStore> {
    store: S,
}

impl<S: HintStore> UiHints<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn email(&self) -> Option<String> {
        self.store.get(USER_EMAIL_KEY).filter(|e| !e.is_empty())
    }

    pub fn set_email(&self, email: &str) {
        self.store.set(USER_EMAIL_KEY, email);
    }

    pub fn email_verified(&self) -> bool {
        self.store.get(EMAIL_VERIFIED_KEY).as_deref() == Some("true")
    }

    pub fn set_email_verified(&self, verified: bool) {
        self.store
            .set(EMAIL_VERIFIED_KEY, if verified { "true" } else { "false" });
    }

    /// Forget everything tied to the signed-in user.
    pub fn clear(&self) {
        self.store.remove(USER_EMAIL_KEY);
        self.store.remove(EMAIL_VERIFIED_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn verified_flag_defaults_to_false() {
        let hints = UiHints::new(MemoryStore::new());
        assert!(!hints.email_verified());
        hints.set_email_verified(true);
        assert!(hints.email_verified());
    }

    #[test]
    fn clear_drops_email_and_verification() {
        let store = MemoryStore::new();
        let hints = UiHints::new(store.clone());
        hints.set_email("grower@example.com");
        hints.set_email_verified(true);
        assert_eq!(hints.email().as_deref(), Some("grower@example.com"));

        hints.clear();
        assert_eq!(hints.email(), None);
        assert!(!hints.email_verified());
        assert_eq!(store.get(USER_EMAIL_KEY), None);
    }

    #[test]
    fn write_failures_are_reported_not_raised() {
        assert!(check_write::<()>("set", USER_EMAIL_KEY, Ok(())));
        assert!(!check_write("remove", EMAIL_VERIFIED_KEY, Err("QuotaExceededError")));
    }

    #[test]
    fn blank_email_is_treated_as_absent() {
        let hints = UiHints::new(MemoryStore::new());
        hints.set_email("");
        assert_eq!(hints.email(), None);
    }
}
