//! Login page view with email/password form.

use dioxus::prelude::*;
use store::forms::{validate_login, LoginDraft};
use store::FieldErrors;
use ui::components::{Button, FieldError, FormBanner, Input, Label};
use ui::{complete_sign_in, use_auth, use_hints};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let hints = use_hints();
    let nav = use_navigator();
    let remembered = hints.email().unwrap_or_default();
    let mut draft = use_signal(|| LoginDraft {
        email: remembered,
        password: String::new(),
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the guides
    if auth.read().is_authenticated() {
        nav.replace(Route::Guides {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match validate_login(&draft.read()) {
            Ok(request) => request,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        banner.set(None);
        loading.set(true);
        let hints = hints.clone();
        spawn(async move {
            let client = auth.peek().client.clone();
            let token = match client.login(&request).await {
                Ok(token) => token,
                Err(e) => {
                    loading.set(false);
                    banner.set(Some(e.user_message()));
                    return;
                }
            };
            let email = request.user_email.clone();
            complete_sign_in(&mut auth, &hints, email.clone(), &token);

            let mut verified = token.is_email_verified.unwrap_or(false);
            if token.is_email_verified.is_none() {
                let client = auth.peek().client.clone();
                match client.verification_status(&email).await {
                    Ok(status) => verified = status.is_email_verified,
                    Err(e) => tracing::warn!("verification status unavailable: {e}"),
                }
                hints.set_email_verified(verified);
                let next = auth.peek().with_email_verified(verified);
                auth.set(next);
            }
            loading.set(false);
            if verified {
                nav.replace(Route::Guides {});
            } else {
                nav.replace(Route::VerifyEmail {});
            }
        });
    };

    let error = |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Grow Guides" }
            p { class: "view-muted", "Sign in to manage your grow guides." }

            form { class: "narrow-form", novalidate: true, onsubmit: handle_login,
                div { class: "field",
                    Label { html_for: "login-email", "Email" }
                    Input {
                        id: "login-email",
                        r#type: "email",
                        autocomplete: "email".to_string(),
                        value: draft.read().email.clone(),
                        invalid: error("email").is_some(),
                        oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                    }
                    FieldError { message: error("email") }
                }
                div { class: "field",
                    Label { html_for: "login-password", "Password" }
                    Input {
                        id: "login-password",
                        r#type: "password",
                        autocomplete: "current-password".to_string(),
                        value: draft.read().password.clone(),
                        invalid: error("password").is_some(),
                        oninput: move |evt: FormEvent| draft.write().password = evt.value(),
                    }
                    FieldError { message: error("password") }
                }
                FormBanner { message: banner() }
                Button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p { class: "auth-links",
                Link { to: Route::ForgotPassword {}, "Forgot your password?" }
            }
            p { class: "auth-links",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
