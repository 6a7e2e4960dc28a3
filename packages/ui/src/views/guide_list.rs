use api::ApiClient;
use dioxus::prelude::*;
use store::browse::{self, ListState};
use store::{QueryKey, Variety};

use crate::components::{use_toast, Button, ButtonVariant, Input};
use crate::icons::{FaEye, FaEyeSlash, FaPen, FaPlus, FaSeedling, FaTrashCan};
use crate::{use_auth, use_cache, use_query, Icon};

/// The signed-in user's own grow guides.
///
/// Delete, visibility and active toggles patch the cache first and roll back
/// if the backend refuses.
#[component]
pub fn GuideListView(
    on_open: EventHandler<String>,
    on_edit: EventHandler<String>,
    on_create: EventHandler<()>,
) -> Element {
    let cache = use_cache();
    let auth = use_auth();
    let toast = use_toast();
    let query = use_query(QueryKey::Varieties, |client: ApiClient| async move {
        client.list_varieties().await
    });
    let mut search_text = use_signal(String::new);
    let mut confirm_delete = use_signal(|| Option::<Variety>::None);

    let toggle_public = move |guide: Variety| {
        spawn(async move {
            let client = auth.peek().client.clone();
            let next = !guide.is_public;
            let id = guide.variety_id.clone();
            let settle = [
                QueryKey::Varieties,
                QueryKey::PublicVarieties,
                QueryKey::Variety(id.clone()),
            ];
            let patch_id = id.clone();
            let result = cache
                .mutate(
                    move |c| c.set_variety_public(&patch_id, next),
                    async move { client.set_variety_visibility(&id, next).await },
                    &settle,
                )
                .await;
            match result {
                Ok(_) if next => toast.success(format!("{} is now public", guide.variety_name)),
                Ok(_) => toast.success(format!("{} is now private", guide.variety_name)),
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    let toggle_active = move |guide: Variety| {
        spawn(async move {
            let client = auth.peek().client.clone();
            let next = !guide.is_active;
            let id = guide.variety_id.clone();
            let settle = [QueryKey::Varieties, QueryKey::Variety(id.clone())];
            let patch_id = id.clone();
            let result = cache
                .mutate(
                    move |c| c.set_variety_active(&patch_id, next),
                    async move { client.set_variety_active(&id, next).await },
                    &settle,
                )
                .await;
            if let Err(e) = result {
                toast.error(e.user_message());
            }
        });
    };

    let mut delete_guide = move |guide: Variety| {
        confirm_delete.set(None);
        spawn(async move {
            let client = auth.peek().client.clone();
            let id = guide.variety_id.clone();
            let patch_id = id.clone();
            let result = cache
                .mutate(
                    move |c| c.remove_variety(&patch_id),
                    async move { client.delete_variety(&id).await },
                    &[QueryKey::Varieties, QueryKey::PublicVarieties],
                )
                .await;
            match result {
                Ok(()) => toast.success(format!("Deleted {}", guide.variety_name)),
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    let refreshing = query.is_refreshing();
    let state = query.list_state();
    let all = state.items().to_vec();
    let active = browse::active_count(&all);
    let total = all.len();
    let visible: Vec<Variety> = browse::search(&all, &search_text())
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div { class: "view-page",
            div { class: "view-header",
                h1 { class: "view-title", "My Grow Guides" }
                if refreshing {
                    span { class: "view-muted refresh-note", "Refreshing..." }
                }
                Button {
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    span { "New guide" }
                }
            }

            if let Some(guide) = confirm_delete() {
                div { class: "confirm-panel", role: "alertdialog",
                    p { "Delete \"{guide.variety_name}\"? This cannot be undone." }
                    div { class: "button-row",
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: move |_| delete_guide(guide.clone()),
                            "Delete"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| confirm_delete.set(None),
                            "Cancel"
                        }
                    }
                }
            }

            match state {
                ListState::Loading => rsx! {
                    p { class: "view-muted", "Loading your grow guides..." }
                },
                ListState::Error(message) => rsx! {
                    div { class: "form-banner", role: "alert",
                        p { "Could not load your grow guides: {message}" }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| cache.invalidate(&[QueryKey::Varieties]),
                            "Retry"
                        }
                    }
                },
                ListState::Empty => rsx! {
                    div { class: "empty-state",
                        Icon { icon: FaSeedling, width: 32, height: 32 }
                        p { "You have no grow guides yet." }
                        Button {
                            onclick: move |_| on_create.call(()),
                            "Create your first guide"
                        }
                    }
                },
                ListState::Ready(_) => rsx! {
                    div { class: "list-toolbar",
                        Input {
                            id: "guide-search",
                            class: "search-input",
                            r#type: "search",
                            placeholder: "Search by variety name",
                            value: search_text(),
                            oninput: move |evt: FormEvent| search_text.set(evt.value()),
                        }
                        span { class: "view-muted", "{active} active of {total}" }
                    }
                    if visible.is_empty() {
                        p { class: "view-muted", "No guides match \"{search_text}\"." }
                    }
                    ul { class: "guide-list",
                        for guide in visible {
                            GuideRow {
                                key: "{guide.variety_id}",
                                guide: guide.clone(),
                                on_open: move |id| on_open.call(id),
                                on_edit: move |id| on_edit.call(id),
                                on_toggle_public: toggle_public,
                                on_toggle_active: toggle_active,
                                on_delete: move |g| confirm_delete.set(Some(g)),
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn GuideRow(
    guide: Variety,
    on_open: EventHandler<String>,
    on_edit: EventHandler<String>,
    on_toggle_public: EventHandler<Variety>,
    on_toggle_active: EventHandler<Variety>,
    on_delete: EventHandler<Variety>,
) -> Element {
    let family = guide
        .family_name()
        .unwrap_or(browse::UNKNOWN_FAMILY)
        .to_string();
    let id = guide.variety_id.clone();
    let edit_id = id.clone();
    let public_guide = guide.clone();
    let active_guide = guide.clone();
    let delete_guide = guide.clone();
    let visibility_title = if guide.is_public { "Make private" } else { "Make public" };

    rsx! {
        li { class: if guide.is_active { "guide-row guide-row-active" } else { "guide-row" },
            button {
                class: "guide-name",
                onclick: move |_| on_open.call(id.clone()),
                "{guide.variety_name}"
            }
            span { class: "guide-family", "{family}" }
            label { class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: guide.is_active,
                    onchange: move |_| on_toggle_active.call(active_guide.clone()),
                }
                "Active"
            }
            Button {
                variant: ButtonVariant::Ghost,
                title: visibility_title.to_string(),
                onclick: move |_| on_toggle_public.call(public_guide.clone()),
                if guide.is_public {
                    Icon { icon: FaEye, width: 14, height: 14 }
                    span { "Public" }
                } else {
                    Icon { icon: FaEyeSlash, width: 14, height: 14 }
                    span { "Private" }
                }
            }
            Button {
                variant: ButtonVariant::Ghost,
                title: "Edit".to_string(),
                onclick: move |_| on_edit.call(edit_id.clone()),
                Icon { icon: FaPen, width: 14, height: 14 }
            }
            Button {
                variant: ButtonVariant::Ghost,
                title: "Delete".to_string(),
                onclick: move |_| on_delete.call(delete_guide.clone()),
                Icon { icon: FaTrashCan, width: 14, height: 14 }
            }
        }
    }
}
