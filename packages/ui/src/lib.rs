//! Shared components, providers and page bodies for the Grow Guides client.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{
    complete_sign_in, use_auth, use_hints, AuthProvider, AuthState, LogoutButton, PlatformHints,
    Session,
};

mod cache;
pub use cache::{use_cache, use_query, CacheProvider, Query, SharedCache};

pub(crate) async fn sleep(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
