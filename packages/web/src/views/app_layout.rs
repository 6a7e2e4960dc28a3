use dioxus::prelude::*;
use ui::{use_auth, LogoutButton, Navbar};

use crate::Route;

/// Shell for signed-in pages. Signed-out visitors are sent to login.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let signed_in = auth.read().is_authenticated();

    use_effect(move || {
        if !auth.read().is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    if !signed_in {
        return rsx! {};
    }

    rsx! {
        Navbar {
            Link { to: Route::Guides {}, "My guides" }
            Link { to: Route::Browse {}, "Browse" }
            Link { to: Route::Allotment {}, "Allotment" }
            Link { to: Route::Preferences {}, "Feed days" }
            Link { to: Route::Profile {}, "Profile" }
            LogoutButton {
                class: "btn btn-ghost",
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
            }
        }
        main {
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Page not found" }
            p { class: "view-muted", "Nothing lives at /{path}." }
            Link { to: Route::Root {}, "Go home" }
        }
    }
}
