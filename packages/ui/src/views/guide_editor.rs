use api::ApiClient;
use dioxus::prelude::*;
use store::forms::{validate_grow_guide, GrowGuideDraft, GrowGuideRules};
use store::{FieldErrors, QueryKey, Variety, VarietyOptions};

use crate::components::{
    use_toast, Button, ButtonVariant, Checkbox, FieldError, FormBanner, Input, Label, Select,
    Textarea,
};
use crate::{use_auth, use_cache, use_query};

/// Create a grow guide, or edit an existing one when `variety_id` is set.
#[component]
pub fn GuideEditorView(
    variety_id: Option<String>,
    on_saved: EventHandler<Variety>,
    on_cancel: EventHandler<()>,
) -> Element {
    match variety_id {
        Some(variety_id) => rsx! {
            EditGuide { variety_id, on_saved, on_cancel }
        },
        None => rsx! {
            GuideForm { on_saved, on_cancel }
        },
    }
}

#[component]
fn EditGuide(
    variety_id: String,
    on_saved: EventHandler<Variety>,
    on_cancel: EventHandler<()>,
) -> Element {
    let id = variety_id.clone();
    let query = use_query(QueryKey::Variety(variety_id), move |client: ApiClient| {
        let id = id.clone();
        async move { client.get_variety(&id).await }
    });

    match (query.data, query.error) {
        (Some(variety), _) => rsx! {
            GuideForm {
                key: "{variety.variety_id}",
                initial: variety,
                on_saved,
                on_cancel,
            }
        },
        (None, Some(message)) => rsx! {
            div { class: "view-page",
                FormBanner { message }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_cancel.call(()),
                    "Back"
                }
            }
        },
        (None, None) => rsx! {
            p { class: "view-page view-muted", "Loading grow guide..." }
        },
    }
}

fn week_choices(options: &VarietyOptions) -> Vec<(String, String)> {
    options
        .weeks
        .iter()
        .map(|w| {
            (
                w.week_id.clone(),
                format!("Week {} ({})", w.week_number, w.week_start_date),
            )
        })
        .collect()
}

fn frequency_choices(options: &VarietyOptions) -> Vec<(String, String)> {
    options
        .frequencies
        .iter()
        .map(|f| (f.frequency_id.clone(), f.frequency_name.clone()))
        .collect()
}

#[component]
fn GuideForm(
    initial: Option<Variety>,
    on_saved: EventHandler<Variety>,
    on_cancel: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let cache = use_cache();
    let toast = use_toast();
    let options = use_query(QueryKey::VarietyOptions, |client: ApiClient| async move {
        client.variety_options().await
    });

    let editing_id = initial.as_ref().map(|v| v.variety_id.clone());
    let is_edit = editing_id.is_some();
    let draft = use_signal(|| {
        initial
            .as_ref()
            .map(GrowGuideDraft::from_variety)
            .unwrap_or_default()
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *saving.peek() {
            return;
        }
        let payload = match validate_grow_guide(&draft.read(), GrowGuideRules::standard()) {
            Ok(payload) => payload,
            Err(field_errors) => {
                tracing::debug!(count = field_errors.len(), "grow guide form rejected");
                banner.set(Some("Please fix the highlighted fields.".to_string()));
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        banner.set(None);
        saving.set(true);
        let editing_id = editing_id.clone();
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = match &editing_id {
                Some(id) => client.update_variety(id, &payload).await,
                None => client.create_variety(&payload).await,
            };
            saving.set(false);
            match result {
                Ok(variety) => {
                    cache.set(QueryKey::Variety(variety.variety_id.clone()), variety.clone());
                    cache.invalidate(&[QueryKey::Varieties, QueryKey::PublicVarieties]);
                    toast.success(if editing_id.is_some() {
                        "Grow guide updated"
                    } else {
                        "Grow guide created"
                    });
                    on_saved.call(variety);
                }
                Err(e) => banner.set(Some(e.user_message())),
            }
        });
    };

    let opts = options.data.clone().unwrap_or_default();
    let weeks = week_choices(&opts);
    let frequencies = frequency_choices(&opts);
    let families: Vec<(String, String)> = opts
        .families
        .iter()
        .map(|f| (f.family_id.clone(), f.family_name.clone()))
        .collect();
    let lifecycles: Vec<(String, String)> = opts
        .lifecycles
        .iter()
        .map(|l| (l.lifecycle_id.clone(), l.lifecycle_name.clone()))
        .collect();
    let conditions: Vec<(String, String)> = opts
        .planting_conditions
        .iter()
        .map(|c| (c.planting_condition_id.clone(), c.planting_condition.clone()))
        .collect();
    let feeds: Vec<(String, String)> = opts
        .feeds
        .iter()
        .map(|f| (f.feed_id.clone(), f.feed_name.clone()))
        .collect();

    rsx! {
        form { class: "view-page guide-form", novalidate: true, onsubmit: submit,
            h1 { class: "view-title",
                if is_edit { "Edit grow guide" } else { "New grow guide" }
            }
            if let Some(message) = options.error.clone() {
                FormBanner { message: format!("Could not load form options: {message}") }
            }

            fieldset {
                legend { "Basics" }
                TextField { field: "variety_name", draft, errors }
                SelectField { field: "family_id", choices: families, draft, errors }
                SelectField { field: "lifecycle_id", choices: lifecycles, draft, errors }
                SelectField { field: "planting_conditions_id", choices: conditions, draft, errors }
            }

            fieldset {
                legend { "Sowing and transplanting" }
                div { class: "field-pair",
                    SelectField {
                        field: "sow_week_start_id",
                        choices: weeks.clone(),
                        draft,
                        errors,
                    }
                    SelectField { field: "sow_week_end_id", choices: weeks.clone(), draft, errors }
                }
                div { class: "field-pair",
                    SelectField {
                        field: "transplant_week_start_id",
                        choices: weeks.clone(),
                        draft,
                        errors,
                    }
                    SelectField {
                        field: "transplant_week_end_id",
                        choices: weeks.clone(),
                        draft,
                        errors,
                    }
                }
            }

            fieldset {
                legend { "Soil and spacing" }
                TextField {
                    field: "soil_ph",
                    kind: "number",
                    step: "0.1".to_string(),
                    draft,
                    errors,
                }
                TextField {
                    field: "plant_depth_cm",
                    kind: "number",
                    step: "any".to_string(),
                    draft,
                    errors,
                }
                TextField {
                    field: "plant_space_cm",
                    kind: "number",
                    step: "any".to_string(),
                    draft,
                    errors,
                }
                TextField {
                    field: "row_width_cm",
                    kind: "number",
                    step: "any".to_string(),
                    draft,
                    errors,
                }
            }

            fieldset {
                legend { "Watering" }
                SelectField {
                    field: "water_frequency_id",
                    choices: frequencies.clone(),
                    draft,
                    errors,
                }
                TextField {
                    field: "high_temp_degrees",
                    kind: "number",
                    step: "any".to_string(),
                    draft,
                    errors,
                }
                SelectField {
                    field: "high_temp_water_frequency_id",
                    choices: frequencies.clone(),
                    draft,
                    errors,
                }
            }

            fieldset {
                legend { "Feeding" }
                SelectField { field: "feed_id", choices: feeds, draft, errors }
                SelectField { field: "feed_week_start_id", choices: weeks.clone(), draft, errors }
                SelectField { field: "feed_frequency_id", choices: frequencies, draft, errors }
            }

            fieldset {
                legend { "Harvest and pruning" }
                div { class: "field-pair",
                    SelectField {
                        field: "harvest_week_start_id",
                        choices: weeks.clone(),
                        draft,
                        errors,
                    }
                    SelectField {
                        field: "harvest_week_end_id",
                        choices: weeks.clone(),
                        draft,
                        errors,
                    }
                }
                div { class: "field-pair",
                    SelectField {
                        field: "prune_week_start_id",
                        choices: weeks.clone(),
                        draft,
                        errors,
                    }
                    SelectField { field: "prune_week_end_id", choices: weeks, draft, errors }
                }
            }

            fieldset {
                legend { "Notes" }
                NotesField { draft, errors }
                PublicToggle { draft }
            }

            FormBanner { message: banner() }
            div { class: "button-row",
                Button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() {
                        "Saving..."
                    } else if is_edit {
                        "Save changes"
                    } else {
                        "Create guide"
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn TextField(
    field: String,
    mut draft: Signal<GrowGuideDraft>,
    errors: Signal<FieldErrors>,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] step: Option<String>,
) -> Element {
    let id = format!("guide-{field}");
    let error = errors.read().get(&field).map(str::to_string);
    let value = draft.read().get(&field).to_string();
    let label = GrowGuideDraft::label(&field);
    rsx! {
        div { class: "field",
            Label { html_for: id.clone(), "{label}" }
            Input {
                id,
                r#type: kind,
                value,
                step,
                invalid: error.is_some(),
                oninput: move |evt: FormEvent| draft.write().set(&field, evt.value()),
            }
            FieldError { message: error }
        }
    }
}

#[component]
fn SelectField(
    field: String,
    choices: Vec<(String, String)>,
    mut draft: Signal<GrowGuideDraft>,
    errors: Signal<FieldErrors>,
) -> Element {
    let id = format!("guide-{field}");
    let error = errors.read().get(&field).map(str::to_string);
    let value = draft.read().get(&field).to_string();
    let label = GrowGuideDraft::label(&field);
    rsx! {
        div { class: "field",
            Label { html_for: id.clone(), "{label}" }
            Select {
                id,
                value,
                options: choices,
                invalid: error.is_some(),
                onchange: move |value: String| draft.write().set(&field, value),
            }
            FieldError { message: error }
        }
    }
}

#[component]
fn NotesField(mut draft: Signal<GrowGuideDraft>, errors: Signal<FieldErrors>) -> Element {
    let error = errors.read().get("notes").map(str::to_string);
    rsx! {
        div { class: "field",
            Label { html_for: "guide-notes", "Notes" }
            Textarea {
                id: "guide-notes",
                value: draft.read().notes.clone(),
                rows: 5,
                invalid: error.is_some(),
                oninput: move |evt: FormEvent| draft.write().notes = evt.value(),
            }
            FieldError { message: error }
        }
    }
}

#[component]
fn PublicToggle(mut draft: Signal<GrowGuideDraft>) -> Element {
    rsx! {
        Checkbox {
            id: "guide-is-public",
            checked: draft.read().is_public,
            onchange: move |checked: bool| draft.write().is_public = checked,
            "Share this guide publicly"
        }
    }
}
