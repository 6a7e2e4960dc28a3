use api::ApiClient;
use dioxus::prelude::*;
use store::forms::{validate_allotment, AllotmentDraft};
use store::{Allotment, FieldErrors, QueryKey};

use crate::components::{use_toast, Button, FieldError, FormBanner, Input, Label};
use crate::{use_auth, use_cache, use_query};

/// Create or edit the user's single allotment.
#[component]
pub fn AllotmentView() -> Element {
    let query = use_query(QueryKey::Allotment, |client: ApiClient| async move {
        client.get_allotment().await
    });

    match (query.data, query.error) {
        (Some(existing), _) => {
            let key = existing
                .as_ref()
                .map(|a| a.user_allotment_id.clone())
                .unwrap_or_else(|| "new".to_string());
            rsx! {
                AllotmentForm { key: "{key}", existing }
            }
        }
        (None, Some(message)) => rsx! {
            div { class: "view-page", FormBanner { message } }
        },
        (None, None) => rsx! {
            p { class: "view-page view-muted", "Loading allotment..." }
        },
    }
}

#[component]
fn AllotmentForm(existing: Option<Allotment>) -> Element {
    let auth = use_auth();
    let cache = use_cache();
    let toast = use_toast();
    let exists = existing.is_some();
    let mut draft = use_signal(|| {
        existing
            .as_ref()
            .map(|a| AllotmentDraft {
                postal_code: a.allotment_postal_zip_code.clone(),
                width_meters: a.allotment_width_meters.to_string(),
                length_meters: a.allotment_length_meters.to_string(),
            })
            .unwrap_or_default()
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = match validate_allotment(&draft.read()) {
            Ok(payload) => payload,
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
            let result = client.save_allotment(&payload, exists).await;
            saving.set(false);
            match result {
                Ok(saved) => {
                    cache.set(QueryKey::Allotment, Some(saved));
                    toast.success(if exists { "Allotment updated" } else { "Allotment created" });
                }
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    let area = {
        let d = draft.read();
        match (d.width_meters.trim().parse::<f64>(), d.length_meters.trim().parse::<f64>()) {
            (Ok(w), Ok(l)) if w > 0.0 && l > 0.0 => Some(format!("{:.1}", w * l)),
            _ => None,
        }
    };
    let error = |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        form { class: "view-page narrow-form", novalidate: true, onsubmit: submit,
            h1 { class: "view-title", "My Allotment" }
            if !exists {
                p { class: "view-muted", "You have not set up your allotment yet." }
            }

            div { class: "field",
                Label { html_for: "allotment-postcode", "Postal code" }
                Input {
                    id: "allotment-postcode",
                    value: draft.read().postal_code.clone(),
                    invalid: error("postal_code").is_some(),
                    oninput: move |evt: FormEvent| draft.write().postal_code = evt.value(),
                }
                FieldError { message: error("postal_code") }
            }
            div { class: "field-pair",
                div { class: "field",
                    Label { html_for: "allotment-width", "Width (m)" }
                    Input {
                        id: "allotment-width",
                        r#type: "number",
                        step: "any".to_string(),
                        value: draft.read().width_meters.clone(),
                        invalid: error("width_meters").is_some(),
                        oninput: move |evt: FormEvent| draft.write().width_meters = evt.value(),
                    }
                    FieldError { message: error("width_meters") }
                }
                div { class: "field",
                    Label { html_for: "allotment-length", "Length (m)" }
                    Input {
                        id: "allotment-length",
                        r#type: "number",
                        step: "any".to_string(),
                        value: draft.read().length_meters.clone(),
                        invalid: error("length_meters").is_some(),
                        oninput: move |evt: FormEvent| draft.write().length_meters = evt.value(),
                    }
                    FieldError { message: error("length_meters") }
                }
            }
            if let Some(area) = area {
                p { class: "view-muted", "Area: {area} m²" }
            }

            FormBanner { message: banner() }
            Button {
                r#type: "submit",
                disabled: saving(),
                if saving() {
                    "Saving..."
                } else if exists {
                    "Save changes"
                } else {
                    "Create allotment"
                }
            }
        }
    }
}
