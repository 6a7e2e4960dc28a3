use api::ApiClient;
use dioxus::prelude::*;
use store::models::Preferences;
use store::QueryKey;

use crate::components::{use_toast, FormBanner, Label, Select};
use crate::{use_auth, use_cache, use_query};

/// Which day of the week each feed is applied.
#[component]
pub fn PreferencesView() -> Element {
    let auth = use_auth();
    let cache = use_cache();
    let toast = use_toast();
    let query = use_query(QueryKey::Preferences, |client: ApiClient| async move {
        client.get_preferences().await
    });

    let change_day = move |(feed_id, day_id): (String, String)| {
        spawn(async move {
            let client = auth.peek().client.clone();
            let patch_feed = feed_id.clone();
            let patch_day = day_id.clone();
            let result = cache
                .mutate(
                    move |c| {
                        c.update::<Preferences>(&QueryKey::Preferences, |prefs| {
                            prefs.set_feed_day(&patch_feed, &patch_day)
                        })
                        .into_iter()
                        .collect()
                    },
                    async move { client.update_feed_day(&feed_id, &day_id).await },
                    &[QueryKey::Preferences],
                )
                .await;
            match result {
                Ok(saved) => toast.success(format!("{} on {}", saved.feed_name, saved.day_name)),
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    let body = match (query.data, query.error) {
        (Some(prefs), _) => {
            let days: Vec<(String, String)> = prefs
                .available_days
                .iter()
                .map(|d| (d.day_id.clone(), d.day_name.clone()))
                .collect();
            rsx! {
                if prefs.user_feed_days.is_empty() {
                    p { class: "empty-state", "No feeds to schedule yet." }
                }
                ul { class: "preference-list",
                    for entry in prefs.user_feed_days.iter() {
                        li { key: "{entry.feed_id}", class: "field",
                            Label { html_for: "feed-{entry.feed_id}", "{entry.feed_name}" }
                            Select {
                                id: "feed-{entry.feed_id}",
                                value: entry.day_id.clone(),
                                options: days.clone(),
                                onchange: {
                                    let feed_id = entry.feed_id.clone();
                                    move |day_id: String| change_day((feed_id.clone(), day_id))
                                },
                            }
                        }
                    }
                }
            }
        }
        (None, Some(message)) => rsx! {
            FormBanner { message }
        },
        (None, None) => rsx! {
            p { class: "view-muted", "Loading preferences..." }
        },
    };

    rsx! {
        div { class: "view-page narrow-form",
            h1 { class: "view-title", "Feed days" }
            p { class: "view-muted", "Pick the day you like to feed with each product." }
            {body}
        }
    }
}
