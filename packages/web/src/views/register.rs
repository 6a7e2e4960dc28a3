//! Registration page view with email/password form.

use dioxus::prelude::*;
use store::forms::{validate_register, RegisterDraft};
use store::FieldErrors;
use ui::components::{Button, FieldError, FormBanner, Input, Label};
use ui::{complete_sign_in, use_auth, use_hints};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let hints = use_hints();
    let nav = use_navigator();
    let mut draft = use_signal(RegisterDraft::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if auth.read().is_authenticated() {
        nav.replace(Route::Guides {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match validate_register(&draft.read()) {
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
            match client.register(&request).await {
                Ok(token) => {
                    complete_sign_in(&mut auth, &hints, request.user_email.clone(), &token);
                    // New accounts must confirm their address first
                    let client = auth.peek().client.clone();
                    if let Err(e) = client.request_verification_email(&request.user_email).await {
                        tracing::warn!("verification email not sent: {e}");
                    }
                    loading.set(false);
                    nav.replace(Route::VerifyEmail {});
                }
                Err(e) => {
                    loading.set(false);
                    banner.set(Some(e.user_message()));
                }
            }
        });
    };

    let error = |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Create Account" }
            p { class: "view-muted", "Sign up to start writing grow guides." }

            form { class: "narrow-form", novalidate: true, onsubmit: handle_register,
                div { class: "field",
                    Label { html_for: "register-email", "Email" }
                    Input {
                        id: "register-email",
                        r#type: "email",
                        autocomplete: "email".to_string(),
                        value: draft.read().email.clone(),
                        invalid: error("email").is_some(),
                        oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                    }
                    FieldError { message: error("email") }
                }
                div { class: "field",
                    Label { html_for: "register-first-name", "First name" }
                    Input {
                        id: "register-first-name",
                        autocomplete: "given-name".to_string(),
                        value: draft.read().first_name.clone(),
                        invalid: error("first_name").is_some(),
                        oninput: move |evt: FormEvent| draft.write().first_name = evt.value(),
                    }
                    FieldError { message: error("first_name") }
                }
                div { class: "field",
                    Label { html_for: "register-country", "Country code" }
                    Input {
                        id: "register-country",
                        placeholder: "GB",
                        value: draft.read().country_code.clone(),
                        invalid: error("country_code").is_some(),
                        oninput: move |evt: FormEvent| draft.write().country_code = evt.value(),
                    }
                    FieldError { message: error("country_code") }
                }
                div { class: "field",
                    Label { html_for: "register-password", "Password" }
                    Input {
                        id: "register-password",
                        r#type: "password",
                        autocomplete: "new-password".to_string(),
                        placeholder: "8 to 30 characters",
                        value: draft.read().password.clone(),
                        invalid: error("password").is_some(),
                        oninput: move |evt: FormEvent| draft.write().password = evt.value(),
                    }
                    FieldError { message: error("password") }
                }
                div { class: "field",
                    Label { html_for: "register-password-confirm", "Confirm password" }
                    Input {
                        id: "register-password-confirm",
                        r#type: "password",
                        autocomplete: "new-password".to_string(),
                        value: draft.read().password_confirm.clone(),
                        invalid: error("password_confirm").is_some(),
                        oninput: move |evt: FormEvent| draft.write().password_confirm = evt.value(),
                    }
                    FieldError { message: error("password_confirm") }
                }
                FormBanner { message: banner() }
                Button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p { class: "auth-links",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
