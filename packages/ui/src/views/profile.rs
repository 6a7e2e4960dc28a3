use api::ApiClient;
use dioxus::prelude::*;
use store::forms::{validate_profile, ProfileDraft};
use store::{FieldErrors, QueryKey, UserProfile};

use crate::components::{use_toast, Button, FieldError, FormBanner, Input, Label};
use crate::{use_auth, use_cache, use_query};

/// Account details for the signed-in user.
#[component]
pub fn ProfileView() -> Element {
    let profile = use_query(QueryKey::Profile, |client: ApiClient| async move {
        client.get_profile().await
    });

    rsx! {
        div { class: "view-page",
            h1 { class: "view-title", "Profile" }
            match (profile.data, profile.error) {
                (Some(profile), _) => rsx! {
                    ProfileForm { key: "{profile.user_id}", profile }
                },
                (None, Some(message)) => rsx! {
                    FormBanner { message }
                },
                (None, None) => rsx! {
                    p { class: "view-muted", "Loading profile..." }
                },
            }
        }
    }
}

#[component]
fn ProfileForm(profile: UserProfile) -> Element {
    let auth = use_auth();
    let cache = use_cache();
    let toast = use_toast();
    let mut draft = use_signal(|| ProfileDraft {
        first_name: profile.user_first_name.clone(),
        country_code: profile.user_country_code.clone(),
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let update = match validate_profile(&draft.read()) {
            Ok(update) => update,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        banner.set(None);
        saving.set(true);
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = client.update_profile(&update).await;
            saving.set(false);
            match result {
                Ok(saved) => {
                    cache.set(QueryKey::Profile, saved);
                    toast.success("Profile saved");
                }
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    let error = |field: &str| errors.read().get(field).map(str::to_string);
    let verified = if profile.is_email_verified { "verified" } else { "not verified" };

    rsx! {
        form { class: "narrow-form", novalidate: true, onsubmit: submit,
            p { class: "view-muted", "{profile.user_email} ({verified})" }
            div { class: "field",
                Label { html_for: "profile-first-name", "First name" }
                Input {
                    id: "profile-first-name",
                    value: draft.read().first_name.clone(),
                    invalid: error("first_name").is_some(),
                    oninput: move |evt: FormEvent| draft.write().first_name = evt.value(),
                }
                FieldError { message: error("first_name") }
            }
            div { class: "field",
                Label { html_for: "profile-country", "Country code" }
                Input {
                    id: "profile-country",
                    placeholder: "GB",
                    value: draft.read().country_code.clone(),
                    invalid: error("country_code").is_some(),
                    oninput: move |evt: FormEvent| draft.write().country_code = evt.value(),
                }
                FieldError { message: error("country_code") }
            }
            FormBanner { message: banner() }
            Button {
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Save profile" }
            }
        }
    }
}
