//! Authentication context and hooks for the UI.
//!
//! The access token lives only in memory inside [`AuthState`]. Browser storage
//! keeps the last email and its verification flag as hints for the login and
//! verification pages.

use std::rc::Rc;

use api::{ApiClient, TokenResponse};
use dioxus::prelude::*;
use store::UiHints;

use crate::cache::use_cache;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
type PlatformStore = store::MemoryStore;

pub type PlatformHints = UiHints<PlatformStore>;

/// Who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub email: String,
    pub user_id: Option<String>,
    pub email_verified: bool,
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// Carries the bearer token while signed in.
    pub client: ApiClient,
    pub session: Option<Session>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.email.as_str())
    }

    pub fn signed_in(&self, email: String, token: &TokenResponse) -> Self {
        Self {
            client: self.client.clone().with_token(token.access_token.clone()),
            session: Some(Session {
                email,
                user_id: token.user_id.clone(),
                email_verified: token.is_email_verified.unwrap_or(false),
            }),
        }
    }

    pub fn signed_out(&self) -> Self {
        Self {
            client: self.client.clone().without_token(),
            session: None,
        }
    }

    pub fn with_email_verified(&self, verified: bool) -> Self {
        let mut next = self.clone();
        if let Some(session) = next.session.as_mut() {
            session.email_verified = verified;
        }
        next
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_hints() -> Rc<PlatformHints> {
    use_context::<Rc<PlatformHints>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(client: ApiClient, children: Element) -> Element {
    use_context_provider(|| Rc::new(UiHints::new(PlatformStore::default())));
    let auth_state = use_signal(|| AuthState {
        client: client.clone(),
        session: None,
    });
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Record a successful login or registration.
pub fn complete_sign_in(
    auth: &mut Signal<AuthState>,
    hints: &PlatformHints,
    email: String,
    token: &TokenResponse,
) {
    hints.set_email(&email);
    hints.set_email_verified(token.is_email_verified.unwrap_or(false));
    tracing::info!(user_id = ?token.user_id, "signed in");
    let next = auth.peek().signed_in(email, token);
    auth.set(next);
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();
    let hints = use_hints();
    let cache = use_cache();

    let onclick = move |_| {
        hints.clear();
        cache.clear();
        let next = auth_state.peek().signed_out();
        auth_state.set(next);
        tracing::info!("signed out");
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
