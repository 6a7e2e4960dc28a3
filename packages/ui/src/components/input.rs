//! Form controls. Every control takes an `invalid` flag so a field error can
//! highlight it, and reports edits as plain `String`s.

use dioxus::prelude::*;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "label", r#for: html_for, {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] step: Option<String>,
    #[props(default)] autocomplete: Option<String>,
    #[props(default)] invalid: bool,
    #[props(default)] disabled: bool,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    let input_type = r#type;
    rsx! {
        input {
            id,
            class: if invalid { "input input-invalid {class}" } else { "input {class}" },
            r#type: input_type,
            placeholder,
            value,
            step,
            autocomplete,
            disabled,
            "aria-invalid": invalid,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 4)] rows: u32,
    #[props(default)] invalid: bool,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            id,
            class: if invalid { "input input-invalid {class}" } else { "input {class}" },
            placeholder,
            rows: "{rows}",
            value,
            "aria-invalid": invalid,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// Single choice from `(value, label)` pairs. The empty value means "none".
#[component]
pub fn Select(
    #[props(default)] id: String,
    value: String,
    options: Vec<(String, String)>,
    #[props(default = "Select...".to_string())] placeholder: String,
    #[props(default)] invalid: bool,
    #[props(default)] disabled: bool,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            id,
            class: if invalid { "input input-invalid" } else { "input" },
            disabled,
            "aria-invalid": invalid,
            onchange: move |evt: FormEvent| onchange.call(evt.value()),
            option { value: "", selected: value.is_empty(), "{placeholder}" }
            for (option_value, label) in options {
                option {
                    key: "{option_value}",
                    selected: option_value == value,
                    value: "{option_value}",
                    "{label}"
                }
            }
        }
    }
}

#[component]
pub fn Checkbox(
    id: String,
    checked: bool,
    #[props(default)] disabled: bool,
    onchange: EventHandler<bool>,
    children: Element,
) -> Element {
    rsx! {
        label { class: "checkbox", r#for: "{id}",
            input {
                id: "{id}",
                r#type: "checkbox",
                checked,
                disabled,
                onchange: move |evt: FormEvent| onchange.call(evt.checked()),
            }
            {children}
        }
    }
}

/// Inline message under a field.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            p { class: "field-error", role: "alert", "{message}" }
        },
        None => rsx! {},
    }
}

/// Form-level error shown above the submit button.
#[component]
pub fn FormBanner(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            div { class: "form-banner", role: "alert", "{message}" }
        },
        None => rsx! {},
    }
}
