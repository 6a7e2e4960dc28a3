//! Email verification pages: the "check your inbox" screen and the link target.

use dioxus::prelude::*;
use ui::components::{use_toast, Button, ButtonVariant, FormBanner, Input, Label};
use ui::{use_auth, use_hints};

use crate::Route;

/// Asks the user to confirm their address, with resend and re-check actions.
#[component]
pub fn VerifyEmail() -> Element {
    let mut auth = use_auth();
    let hints = use_hints();
    let nav = use_navigator();
    let toast = use_toast();
    let known = auth
        .read()
        .email()
        .map(str::to_string)
        .or_else(|| hints.email());
    let mut email = use_signal(|| known.clone().unwrap_or_default());
    let mut banner = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let resend = move |_| {
        let address = email.peek().trim().to_string();
        if address.is_empty() {
            banner.set(Some("Enter the email you signed up with".to_string()));
            return;
        }
        banner.set(None);
        busy.set(true);
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = client.request_verification_email(&address).await;
            busy.set(false);
            match result {
                Ok(()) => toast.success(format!("Verification email sent to {address}")),
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    let check_hints = hints.clone();
    let check = move |_| {
        let address = email.peek().trim().to_string();
        if address.is_empty() {
            banner.set(Some("Enter the email you signed up with".to_string()));
            return;
        }
        banner.set(None);
        busy.set(true);
        let hints = check_hints.clone();
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = client.verification_status(&address).await;
            busy.set(false);
            match result {
                Ok(status) if status.is_email_verified => {
                    hints.set_email_verified(true);
                    let next = auth.peek().with_email_verified(true);
                    let signed_in = next.is_authenticated();
                    auth.set(next);
                    toast.success("Email verified");
                    if signed_in {
                        nav.replace(Route::Guides {});
                    } else {
                        nav.replace(Route::Login {});
                    }
                }
                Ok(_) => banner.set(Some(
                    "Your email is not verified yet. Follow the link we sent you.".to_string(),
                )),
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Verify your email" }
            div { class: "narrow-form",
                if let Some(address) = known {
                    p { class: "view-muted",
                        "We sent a verification link to {address}. "
                        "Open it to activate your account."
                    }
                } else {
                    p { class: "view-muted", "Enter your email to get a new verification link." }
                    div { class: "field",
                        Label { html_for: "verify-email", "Email" }
                        Input {
                            id: "verify-email",
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                }
                FormBanner { message: banner() }
                div { class: "button-row",
                    Button { disabled: busy(), onclick: check, "I have verified" }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy(),
                        onclick: resend,
                        "Resend email"
                    }
                }
            }
            p { class: "auth-links",
                Link { to: Route::Login {}, "Back to sign in" }
            }
        }
    }
}

/// Target of the link in the verification email.
#[component]
pub fn ConfirmEmail(token: String) -> Element {
    let mut auth = use_auth();
    let hints = use_hints();

    let outcome = use_resource(move || {
        let token = token.clone();
        let hints = hints.clone();
        async move {
            let client = auth.peek().client.clone();
            let result = client.confirm_email(&token).await;
            if result.is_ok() {
                hints.set_email_verified(true);
                let next = auth.peek().with_email_verified(true);
                auth.set(next);
            }
            result.map_err(|e| e.user_message())
        }
    });

    let signed_in = auth.read().is_authenticated();

    rsx! {
        div { class: "auth-page",
            h1 { class: "view-title", "Email verification" }
            div { class: "narrow-form",
                match outcome() {
                    None => rsx! {
                        p { class: "view-muted", "Confirming your email..." }
                    },
                    Some(Ok(())) => rsx! {
                        p { "Thanks, your email is confirmed." }
                        if signed_in {
                            Link { to: Route::Guides {}, "Go to your grow guides" }
                        } else {
                            Link { to: Route::Login {}, "Sign in" }
                        }
                    },
                    Some(Err(message)) => rsx! {
                        FormBanner { message }
                        Link { to: Route::VerifyEmail {}, "Send a new link" }
                    },
                }
            }
        }
    }
}
