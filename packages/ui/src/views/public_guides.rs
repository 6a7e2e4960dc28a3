use std::collections::HashSet;

use api::ApiClient;
use dioxus::prelude::*;
use store::browse::{self, FamilyGroup, ListState};
use store::{QueryKey, Variety};

use crate::components::{use_toast, Button, ButtonVariant, Input};
use crate::icons::{FaChevronDown, FaChevronRight, FaCopy};
use crate::{use_auth, use_cache, use_query, Icon};

/// Guides shared by other growers, grouped by plant family.
#[component]
pub fn PublicGuidesView(
    on_open: EventHandler<String>,
    on_copied: EventHandler<Variety>,
) -> Element {
    let auth = use_auth();
    let cache = use_cache();
    let toast = use_toast();
    let query = use_query(QueryKey::PublicVarieties, |client: ApiClient| async move {
        client.list_public_varieties().await
    });
    let mut search_text = use_signal(String::new);
    let mut expanded = use_signal(HashSet::<String>::new);
    let mut copying = use_signal(|| Option::<String>::None);

    let copy_guide = move |guide: Variety| {
        if copying.peek().is_some() {
            return;
        }
        copying.set(Some(guide.variety_id.clone()));
        spawn(async move {
            let client = auth.peek().client.clone();
            let result = client.copy_variety(&guide.variety_id).await;
            copying.set(None);
            match result {
                Ok(copy) => {
                    cache.invalidate(&[QueryKey::Varieties]);
                    toast.success(format!("Copied {} to your guides", guide.variety_name));
                    on_copied.call(copy);
                }
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    let refreshing = query.is_refreshing();
    let state = query.list_state();
    let all = state.items().to_vec();
    let searching = !search_text().trim().is_empty();
    let groups: Vec<FamilyGroup> = browse::group_by_family(browse::search(&all, &search_text()));

    rsx! {
        div { class: "view-page",
            h1 { class: "view-title", "Browse Grow Guides" }
            p { class: "view-muted",
                "Guides other growers have shared. Copy one to make it your own."
            }
            if refreshing {
                p { class: "view-muted refresh-note", "Refreshing..." }
            }

            match state {
                ListState::Loading => rsx! {
                    p { class: "view-muted", "Loading public guides..." }
                },
                ListState::Error(message) => rsx! {
                    div { class: "form-banner", role: "alert",
                        p { "Could not load public guides: {message}" }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| cache.invalidate(&[QueryKey::PublicVarieties]),
                            "Retry"
                        }
                    }
                },
                ListState::Empty => rsx! {
                    p { class: "empty-state", "No one has shared a grow guide yet." }
                },
                ListState::Ready(_) => rsx! {
                    div { class: "list-toolbar",
                        Input {
                            id: "public-search",
                            class: "search-input",
                            r#type: "search",
                            placeholder: "Search by variety name",
                            value: search_text(),
                            oninput: move |evt: FormEvent| search_text.set(evt.value()),
                        }
                    }
                    if groups.is_empty() {
                        p { class: "view-muted", "No guides match \"{search_text}\"." }
                    }
                    div { class: "accordion",
                        for group in groups {
                            FamilySection {
                                key: "{group.family_name}",
                                open: searching || expanded.read().contains(&group.family_name),
                                group: group.clone(),
                                copying: copying(),
                                on_toggle: move |family: String| {
                                    let mut open = expanded.write();
                                    if !open.remove(&family) {
                                        open.insert(family);
                                    }
                                },
                                on_open: move |id| on_open.call(id),
                                on_copy: copy_guide,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn FamilySection(
    group: FamilyGroup,
    open: bool,
    copying: Option<String>,
    on_toggle: EventHandler<String>,
    on_open: EventHandler<String>,
    on_copy: EventHandler<Variety>,
) -> Element {
    let family = group.family_name.clone();
    let count = group.guides.len();

    rsx! {
        section { class: "accordion-section",
            button {
                class: "accordion-header",
                "aria-expanded": open,
                onclick: move |_| on_toggle.call(family.clone()),
                if open {
                    Icon { icon: FaChevronDown, width: 12, height: 12 }
                } else {
                    Icon { icon: FaChevronRight, width: 12, height: 12 }
                }
                span { "{group.family_name}" }
                span { class: "badge", "{count}" }
            }
            if open {
                ul { class: "guide-list",
                    for guide in group.guides.iter() {
                        PublicGuideRow {
                            key: "{guide.variety_id}",
                            busy: copying.as_deref() == Some(guide.variety_id.as_str()),
                            guide: guide.clone(),
                            on_open,
                            on_copy,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PublicGuideRow(
    guide: Variety,
    busy: bool,
    on_open: EventHandler<String>,
    on_copy: EventHandler<Variety>,
) -> Element {
    let id = guide.variety_id.clone();
    let to_copy = guide.clone();
    let lifecycle = guide
        .lifecycle
        .as_ref()
        .map(|l| l.lifecycle_name.clone())
        .unwrap_or_default();

    rsx! {
        li { class: "guide-row",
            button {
                class: "guide-name",
                onclick: move |_| on_open.call(id.clone()),
                "{guide.variety_name}"
            }
            span { class: "guide-family", "{lifecycle}" }
            Button {
                variant: ButtonVariant::Outline,
                disabled: busy,
                onclick: move |_| on_copy.call(to_copy.clone()),
                Icon { icon: FaCopy, width: 14, height: 14 }
                span { if busy { "Copying..." } else { "Copy" } }
            }
        }
    }
}
