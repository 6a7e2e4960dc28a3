use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dioxus::prelude::*;

const TOAST_TTL_SECS: i64 = 4;
const SWEEP_EVERY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
    expires_at: DateTime<Utc>,
}

/// Handle for raising notifications. Copy it into event handlers freely.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);
        items.write().push(Toast {
            id,
            kind,
            message,
            expires_at: Utc::now() + TimeDelta::seconds(TOAST_TTL_SECS),
        });
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Owns the toast stack and expires entries. Wrap the app with it.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let items = use_signal(Vec::<Toast>::new);
    let next_id = use_signal(|| 0u64);
    let toasts = use_context_provider(|| Toasts { items, next_id });

    use_future(move || async move {
        let mut items = items;
        loop {
            crate::sleep(SWEEP_EVERY).await;
            let now = Utc::now();
            if items.peek().iter().any(|t| t.expires_at <= now) {
                items.write().retain(|t| t.expires_at > now);
            }
        }
    });

    rsx! {
        {children}
        div { class: "toast-stack", "aria-live": "polite",
            for toast in items() {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                        ToastKind::Info => "toast toast-info",
                    },
                    role: if toast.kind == ToastKind::Error { "alert" } else { "status" },
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        "aria-label": "Dismiss",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
