use chrono::{DateTime, Utc};

use crate::models::{Family, Variety};

/// A minimal guide for tests.
pub(crate) fn guide(id: &str, name: &str, family: Option<&str>) -> Variety {
    Variety {
        variety_id: id.to_string(),
        variety_name: name.to_string(),
        owner_user_id: "user-1".to_string(),
        family: family.map(|f| Family {
            family_id: format!("fam-{}", f.to_lowercase()),
            family_name: f.to_string(),
        }),
        lifecycle: None,
        sow_week_start_id: "w10".to_string(),
        sow_week_end_id: "w14".to_string(),
        transplant_week_start_id: None,
        transplant_week_end_id: None,
        planting_conditions_id: "outdoors".to_string(),
        soil_ph: 6.5,
        plant_depth_cm: 2.0,
        plant_space_cm: 15.0,
        row_width_cm: None,
        feed_id: None,
        feed_week_start_id: None,
        feed_frequency_id: None,
        water_frequency_id: "weekly".to_string(),
        high_temp_degrees: Some(25.0),
        high_temp_water_frequency_id: Some("daily".to_string()),
        harvest_week_start_id: "w30".to_string(),
        harvest_week_end_id: "w36".to_string(),
        prune_week_start_id: None,
        prune_week_end_id: None,
        notes: None,
        is_public: false,
        is_active: false,
        last_updated: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_default(),
        water_days: Vec::new(),
    }
}
