//! Password reset: request a link, then set a new password from it.

use dioxus::prelude::*;
use store::forms::{validate_password_reset, PasswordResetDraft};
use store::FieldErrors;
use ui::components::{use_toast, Button, FieldError, FormBanner, Input, Label};
use ui::{use_auth, use_hints};

use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let auth = use_auth();
    let hints = use_hints();
    let mut email = use_signal(|| hints.email().unwrap_or_default());
    let mut banner = use_signal(|| Option::<String>::None);
    let mut sent_to = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email.peek().trim().to_string();
        if address.is_empty() || !address.contains('@') {
            banner.set(Some("Please enter a valid email".to_string()));
            return;
        }
        banner.set(None);
        loading.set(true);
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = client.request_password_reset(&address).await;
            loading.set(false);
            match result {
                Ok(()) => sent_to.set(Some(address)),
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Reset your password" }
            if let Some(address) = sent_to() {
                p { class: "view-muted",
                    "If an account exists for {address}, a reset link is on its way."
                }
            } else {
                form { class: "narrow-form", novalidate: true, onsubmit: submit,
                    div { class: "field",
                        Label { html_for: "reset-email", "Email" }
                        Input {
                            id: "reset-email",
                            r#type: "email",
                            autocomplete: "email".to_string(),
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    FormBanner { message: banner() }
                    Button {
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Sending..." } else { "Send reset link" }
                    }
                }
            }
            p { class: "auth-links",
                Link { to: Route::Login {}, "Back to sign in" }
            }
        }
    }
}

/// Target of the link in the reset email.
#[component]
pub fn ResetPassword(token: String) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let toast = use_toast();
    let mut draft = use_signal(PasswordResetDraft::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let password = match validate_password_reset(&draft.read()) {
            Ok(password) => password,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        banner.set(None);
        loading.set(true);
        let token = token.clone();
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = client.reset_password(&token, &password).await;
            loading.set(false);
            match result {
                Ok(()) => {
                    toast.success("Password updated. Sign in with your new password.");
                    nav.replace(Route::Login {});
                }
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    let error = |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Choose a new password" }
            form { class: "narrow-form", novalidate: true, onsubmit: submit,
                div { class: "field",
                    Label { html_for: "new-password", "New password" }
                    Input {
                        id: "new-password",
                        r#type: "password",
                        autocomplete: "new-password".to_string(),
                        value: draft.read().password.clone(),
                        invalid: error("password").is_some(),
                        oninput: move |evt: FormEvent| draft.write().password = evt.value(),
                    }
                    FieldError { message: error("password") }
                }
                div { class: "field",
                    Label { html_for: "new-password-confirm", "Confirm password" }
                    Input {
                        id: "new-password-confirm",
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
                    if loading() { "Saving..." } else { "Set password" }
                }
            }
            p { class: "auth-links",
                Link { to: Route::ForgotPassword {}, "Request a new link" }
            }
        }
    }
}
