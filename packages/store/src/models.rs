//! # Domain models mirroring the Grow Guides backend resources
//!
//! These are plain data-transfer records. They are `Serialize + Deserialize` so
//! the [`api`](../../api) crate can send and receive them as JSON, and `Clone +
//! PartialEq` so the UI can keep them in signals and diff them cheaply.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Variety`] | A grow guide as returned by the backend, with resolved family and lifecycle. |
//! | [`VarietyCreate`] | Create/replace payload from [`crate::forms::validate_grow_guide`]. |
//! | [`VarietyPatch`] | A partial update; absent fields are not serialised. |
//! | [`VarietyOptions`] | Every read-only option list used to populate the editor's selects. |
//! | [`Allotment`] / [`AllotmentPayload`] | The user's single plot record. |
//! | [`UserProfile`] / [`ProfileUpdate`] | Account data shown on the profile page. |
//! | [`Preferences`] | Feed-day preferences plus the feeds and days to choose from. |
//!
//! Identifiers are carried as `String` so the types stay WASM-friendly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Botanical family reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub family_id: String,
    pub family_name: String,
}

/// Plant lifecycle (annual, biennial, perennial).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub lifecycle_id: String,
    pub lifecycle_name: String,
    #[serde(default)]
    pub productivity_years: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantingConditions {
    pub planting_condition_id: String,
    pub planting_condition: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub frequency_id: String,
    pub frequency_name: String,
    #[serde(default)]
    pub frequency_days_per_year: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub feed_id: String,
    pub feed_name: String,
}

/// A calendar week (1..=52) with its first and last day as `MM/DD` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub week_id: String,
    pub week_number: u32,
    pub week_start_date: String,
    pub week_end_date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub day_id: String,
    pub day_number: u32,
    pub day_name: String,
}

/// A day the guide's plant should be watered on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterDay {
    pub day: Day,
}

/// A grow guide as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variety {
    pub variety_id: String,
    pub variety_name: String,
    pub owner_user_id: String,
    #[serde(default)]
    pub family: Option<Family>,
    #[serde(default)]
    pub lifecycle: Option<Lifecycle>,
    pub sow_week_start_id: String,
    pub sow_week_end_id: String,
    #[serde(default)]
    pub transplant_week_start_id: Option<String>,
    #[serde(default)]
    pub transplant_week_end_id: Option<String>,
    pub planting_conditions_id: String,
    pub soil_ph: f64,
    pub plant_depth_cm: f64,
    pub plant_space_cm: f64,
    #[serde(default)]
    pub row_width_cm: Option<f64>,
    #[serde(default)]
    pub feed_id: Option<String>,
    #[serde(default)]
    pub feed_week_start_id: Option<String>,
    #[serde(default)]
    pub feed_frequency_id: Option<String>,
    pub water_frequency_id: String,
    #[serde(default)]
    pub high_temp_degrees: Option<f64>,
    #[serde(default)]
    pub high_temp_water_frequency_id: Option<String>,
    pub harvest_week_start_id: String,
    pub harvest_week_end_id: String,
    #[serde(default)]
    pub prune_week_start_id: Option<String>,
    #[serde(default)]
    pub prune_week_end_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    /// Whether the current user has this guide marked active.
    #[serde(default)]
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub water_days: Vec<WaterDay>,
}

impl Variety {
    /// Family name for display and grouping.
    pub fn family_name(&self) -> Option<&str> {
        self.family.as_ref().map(|f| f.family_name.as_str())
    }
}

/// Create or full-replace payload for a grow guide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarietyCreate {
    pub variety_name: String,
    pub family_id: String,
    pub lifecycle_id: String,
    pub sow_week_start_id: String,
    pub sow_week_end_id: String,
    pub transplant_week_start_id: Option<String>,
    pub transplant_week_end_id: Option<String>,
    pub planting_conditions_id: String,
    pub soil_ph: f64,
    pub plant_depth_cm: f64,
    pub plant_space_cm: f64,
    pub row_width_cm: Option<f64>,
    pub feed_id: Option<String>,
    pub feed_week_start_id: Option<String>,
    pub feed_frequency_id: Option<String>,
    pub water_frequency_id: String,
    pub high_temp_degrees: Option<f64>,
    pub high_temp_water_frequency_id: Option<String>,
    pub harvest_week_start_id: String,
    pub harvest_week_end_id: String,
    pub prune_week_start_id: Option<String>,
    pub prune_week_end_id: Option<String>,
    pub notes: Option<String>,
    pub is_public: bool,
}

/// Partial update; only `Some` fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VarietyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VarietyPatch {
    pub fn visibility(is_public: bool) -> Self {
        Self {
            is_public: Some(is_public),
            ..Self::default()
        }
    }
}

/// Every option list the grow guide editor needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VarietyOptions {
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub lifecycles: Vec<Lifecycle>,
    #[serde(default)]
    pub planting_conditions: Vec<PlantingConditions>,
    #[serde(default)]
    pub frequencies: Vec<Frequency>,
    #[serde(default)]
    pub feeds: Vec<Feed>,
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl VarietyOptions {
    pub fn week_label(&self, week_id: &str) -> Option<String> {
        self.weeks
            .iter()
            .find(|w| w.week_id == week_id)
            .map(|w| format!("Week {} ({})", w.week_number, w.week_start_date))
    }

    pub fn frequency_label(&self, frequency_id: &str) -> Option<&str> {
        self.frequencies
            .iter()
            .find(|f| f.frequency_id == frequency_id)
            .map(|f| f.frequency_name.as_str())
    }

    pub fn feed_label(&self, feed_id: &str) -> Option<&str> {
        self.feeds
            .iter()
            .find(|f| f.feed_id == feed_id)
            .map(|f| f.feed_name.as_str())
    }
}

/// The user's allotment. At most one exists per user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allotment {
    pub user_allotment_id: String,
    pub user_id: String,
    pub allotment_postal_zip_code: String,
    pub allotment_width_meters: f64,
    pub allotment_length_meters: f64,
}

impl Allotment {
    pub fn area_square_meters(&self) -> f64 {
        self.allotment_width_meters * self.allotment_length_meters
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllotmentPayload {
    pub allotment_postal_zip_code: String,
    pub allotment_width_meters: f64,
    pub allotment_length_meters: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub user_email: String,
    pub user_first_name: String,
    pub user_country_code: String,
    #[serde(default)]
    pub is_email_verified: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub user_first_name: String,
    pub user_country_code: String,
}

/// One feed-to-day preference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedDay {
    pub feed_id: String,
    pub feed_name: String,
    pub day_id: String,
    pub day_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub user_feed_days: Vec<FeedDay>,
    #[serde(default)]
    pub available_feeds: Vec<Feed>,
    #[serde(default)]
    pub available_days: Vec<Day>,
}

impl Preferences {
    /// Apply a local change to one feed's preferred day.
    pub fn set_feed_day(&mut self, feed_id: &str, day_id: &str) {
        let day_name = self
            .available_days
            .iter()
            .find(|d| d.day_id == day_id)
            .map(|d| d.day_name.clone())
            .unwrap_or_default();
        if let Some(entry) = self.user_feed_days.iter_mut().find(|fd| fd.feed_id == feed_id) {
            entry.day_id = day_id.to_string();
            entry.day_name = day_name;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub is_email_verified: bool,
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_email: String,
    pub user_password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_email: String,
    pub user_password: String,
    pub user_first_name: String,
    pub user_country_code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_email_verified: Option<bool>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variety_deserializes_with_optional_fields_missing() {
        let json = r#"{
            "variety_id": "v1",
            "variety_name": "Spring Onions",
            "owner_user_id": "u1",
            "sow_week_start_id": "w1",
            "sow_week_end_id": "w2",
            "planting_conditions_id": "pc1",
            "soil_ph": 6.5,
            "plant_depth_cm": 2,
            "plant_space_cm": 10,
            "water_frequency_id": "f1",
            "harvest_week_start_id": "w20",
            "harvest_week_end_id": "w30",
            "last_updated": "2024-05-01T10:00:00Z"
        }"#;
        let v: Variety = serde_json::from_str(json).unwrap();
        assert_eq!(v.variety_name, "Spring Onions");
        assert!(v.family.is_none());
        assert!(!v.is_public);
        assert!(v.water_days.is_empty());
        assert_eq!(v.family_name(), None);
    }

    #[test]
    fn visibility_patch_only_serializes_flag() {
        let json = serde_json::to_string(&VarietyPatch::visibility(true)).unwrap();
        assert_eq!(json, r#"{"is_public":true}"#);
    }

    #[test]
    fn set_feed_day_updates_name_from_available_days() {
        let mut prefs = Preferences {
            user_feed_days: vec![FeedDay {
                feed_id: "tomato".into(),
                feed_name: "Tomato feed".into(),
                day_id: "mon".into(),
                day_name: "Monday".into(),
            }],
            available_feeds: vec![],
            available_days: vec![Day {
                day_id: "sat".into(),
                day_number: 6,
                day_name: "Saturday".into(),
            }],
        };
        prefs.set_feed_day("tomato", "sat");
        assert_eq!(prefs.user_feed_days[0].day_id, "sat");
        assert_eq!(prefs.user_feed_days[0].day_name, "Saturday");
    }
}
