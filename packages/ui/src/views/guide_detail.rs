use api::ApiClient;
use dioxus::prelude::*;
use store::browse::UNKNOWN_FAMILY;
use store::{QueryKey, Variety, VarietyOptions};

use crate::components::{Button, ButtonVariant, FormBanner};
use crate::{use_auth, use_query};

/// Read-only view of one guide, with option ids resolved to labels.
#[component]
pub fn GuideDetailView(
    variety_id: String,
    on_edit: EventHandler<String>,
    on_back: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let id = variety_id.clone();
    let guide = use_query(QueryKey::Variety(variety_id.clone()), move |client: ApiClient| {
        let id = id.clone();
        async move { client.get_variety(&id).await }
    });
    let options = use_query(QueryKey::VarietyOptions, |client: ApiClient| async move {
        client.variety_options().await
    });

    let Some(variety) = guide.data else {
        return rsx! {
            div { class: "view-page",
                if let Some(message) = guide.error {
                    FormBanner { message }
                } else {
                    p { class: "view-muted", "Loading grow guide..." }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_back.call(()),
                    "Back"
                }
            }
        };
    };

    let opts = options.data.unwrap_or_default();
    let is_owner = auth
        .read()
        .session
        .as_ref()
        .and_then(|s| s.user_id.as_deref())
        .is_some_and(|uid| uid == variety.owner_user_id);
    let rows = detail_rows(&variety, &opts);
    let updated = variety.last_updated.format("%d %b %Y").to_string();

    rsx! {
        div { class: "view-page",
            div { class: "view-header",
                h1 { class: "view-title", "{variety.variety_name}" }
                div { class: "button-row",
                    if is_owner {
                        Button {
                            onclick: move |_| on_edit.call(variety_id.clone()),
                            "Edit"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_back.call(()),
                        "Back"
                    }
                }
            }
            p { class: "view-muted",
                "Last updated {updated}"
                if variety.is_public { " · Public" } else { " · Private" }
            }
            dl { class: "detail-list",
                for (label, value) in rows {
                    div { key: "{label}", class: "detail-row",
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
            if let Some(notes) = variety.notes.as_ref() {
                h2 { class: "view-section-title", "Notes" }
                p { class: "detail-notes", "{notes}" }
            }
        }
    }
}

fn week_range(options: &VarietyOptions, start: &str, end: &str) -> String {
    let label = |id: &str| options.week_label(id).unwrap_or_else(|| id.to_string());
    format!("{} to {}", label(start), label(end))
}

fn optional_week_range(
    options: &VarietyOptions,
    start: &Option<String>,
    end: &Option<String>,
) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(week_range(options, start, end)),
        _ => None,
    }
}

fn frequency(options: &VarietyOptions, id: &str) -> String {
    options.frequency_label(id).unwrap_or(id).to_string()
}

fn detail_rows(v: &Variety, options: &VarietyOptions) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Family", v.family_name().unwrap_or(UNKNOWN_FAMILY).to_string()),
    ];
    if let Some(lifecycle) = &v.lifecycle {
        rows.push(("Lifecycle", lifecycle.lifecycle_name.clone()));
    }
    if let Some(condition) = options
        .planting_conditions
        .iter()
        .find(|c| c.planting_condition_id == v.planting_conditions_id)
    {
        rows.push(("Planting conditions", condition.planting_condition.clone()));
    }
    rows.push(("Sow", week_range(options, &v.sow_week_start_id, &v.sow_week_end_id)));
    if let Some(range) =
        optional_week_range(options, &v.transplant_week_start_id, &v.transplant_week_end_id)
    {
        rows.push(("Transplant", range));
    }
    rows.push(("Soil pH", format!("{}", v.soil_ph)));
    rows.push(("Plant depth", format!("{} cm", v.plant_depth_cm)));
    rows.push(("Plant spacing", format!("{} cm", v.plant_space_cm)));
    if let Some(width) = v.row_width_cm {
        rows.push(("Row width", format!("{width} cm")));
    }
    rows.push(("Watering", frequency(options, &v.water_frequency_id)));
    if let Some(degrees) = v.high_temp_degrees {
        let how_often = v
            .high_temp_water_frequency_id
            .as_deref()
            .map(|id| frequency(options, id))
            .unwrap_or_default();
        rows.push(("Above", format!("{degrees}°C water {how_often}")));
    }
    if let (Some(feed), Some(start), Some(freq)) =
        (&v.feed_id, &v.feed_week_start_id, &v.feed_frequency_id)
    {
        let feed = options.feed_label(feed).unwrap_or(feed);
        let start = options.week_label(start).unwrap_or_else(|| start.clone());
        rows.push(("Feed", format!("{feed} from {start}, {}", frequency(options, freq))));
    }
    rows.push((
        "Harvest",
        week_range(options, &v.harvest_week_start_id, &v.harvest_week_end_id),
    ));
    let prune = optional_week_range(options, &v.prune_week_start_id, &v.prune_week_end_id);
    if let Some(range) = prune {
        rows.push(("Prune", range));
    }
    if !v.water_days.is_empty() {
        let days: Vec<&str> = v.water_days.iter().map(|d| d.day.day_name.as_str()).collect();
        rows.push(("Water on", days.join(", ")));
    }
    rows
}
