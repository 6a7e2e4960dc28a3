//! Grow guide editor validation.

use super::{
    optional_number, optional_text, present, required_number, required_text, FieldErrors, Range,
};
use crate::models::{Variety, VarietyCreate};

const SOIL_PH: Range = Range::new(0.0, 14.0);
const PLANT_DEPTH: Range = Range::new(1.0, 100.0);
const PLANT_SPACE: Range = Range::new(1.0, 1000.0);
const ROW_WIDTH: Range = Range::new(1.0, 1000.0);
const HIGH_TEMP: Range = Range::new(-50.0, 60.0);
const NAME_MAX: usize = 100;

/// How the high temperature field is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighTempRule {
    /// Degrees are required; the watering frequency is optional.
    Required,
    /// Degrees and watering frequency are both set or both blank.
    OptionalPair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowGuideRules {
    pub high_temp: HighTempRule,
    /// Minimum length of non-blank notes.
    pub notes_min_len: Option<usize>,
}

impl GrowGuideRules {
    /// Rules used by the grow guide editor.
    pub const fn standard() -> Self {
        Self {
            high_temp: HighTempRule::Required,
            notes_min_len: Some(5),
        }
    }

    pub const fn relaxed() -> Self {
        Self {
            high_temp: HighTempRule::OptionalPair,
            notes_min_len: None,
        }
    }
}

impl Default for GrowGuideRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Raw editor input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrowGuideDraft {
    pub variety_name: String,
    pub family_id: String,
    pub lifecycle_id: String,
    pub sow_week_start_id: String,
    pub sow_week_end_id: String,
    pub transplant_week_start_id: String,
    pub transplant_week_end_id: String,
    pub planting_conditions_id: String,
    pub soil_ph: String,
    pub plant_depth_cm: String,
    pub plant_space_cm: String,
    pub row_width_cm: String,
    pub feed_id: String,
    pub feed_week_start_id: String,
    pub feed_frequency_id: String,
    pub water_frequency_id: String,
    pub high_temp_degrees: String,
    pub high_temp_water_frequency_id: String,
    pub harvest_week_start_id: String,
    pub harvest_week_end_id: String,
    pub prune_week_start_id: String,
    pub prune_week_end_id: String,
    pub notes: String,
    pub is_public: bool,
}

impl GrowGuideDraft {
    /// Every text field name, in editor order.
    pub const FIELDS: [&'static str; 23] = [
        "variety_name",
        "family_id",
        "lifecycle_id",
        "planting_conditions_id",
        "sow_week_start_id",
        "sow_week_end_id",
        "transplant_week_start_id",
        "transplant_week_end_id",
        "soil_ph",
        "plant_depth_cm",
        "plant_space_cm",
        "row_width_cm",
        "water_frequency_id",
        "high_temp_degrees",
        "high_temp_water_frequency_id",
        "feed_id",
        "feed_week_start_id",
        "feed_frequency_id",
        "harvest_week_start_id",
        "harvest_week_end_id",
        "prune_week_start_id",
        "prune_week_end_id",
        "notes",
    ];

    /// Prefill from an existing guide, for editing or copying.
    pub fn from_variety(v: &Variety) -> Self {
        let opt = |s: &Option<String>| s.clone().unwrap_or_default();
        let num = |n: Option<f64>| n.map(|n| n.to_string()).unwrap_or_default();
        Self {
            variety_name: v.variety_name.clone(),
            family_id: v.family.as_ref().map(|f| f.family_id.clone()).unwrap_or_default(),
            lifecycle_id: v
                .lifecycle
                .as_ref()
                .map(|l| l.lifecycle_id.clone())
                .unwrap_or_default(),
            sow_week_start_id: v.sow_week_start_id.clone(),
            sow_week_end_id: v.sow_week_end_id.clone(),
            transplant_week_start_id: opt(&v.transplant_week_start_id),
            transplant_week_end_id: opt(&v.transplant_week_end_id),
            planting_conditions_id: v.planting_conditions_id.clone(),
            soil_ph: v.soil_ph.to_string(),
            plant_depth_cm: v.plant_depth_cm.to_string(),
            plant_space_cm: v.plant_space_cm.to_string(),
            row_width_cm: num(v.row_width_cm),
            feed_id: opt(&v.feed_id),
            feed_week_start_id: opt(&v.feed_week_start_id),
            feed_frequency_id: opt(&v.feed_frequency_id),
            water_frequency_id: v.water_frequency_id.clone(),
            high_temp_degrees: num(v.high_temp_degrees),
            high_temp_water_frequency_id: opt(&v.high_temp_water_frequency_id),
            harvest_week_start_id: v.harvest_week_start_id.clone(),
            harvest_week_end_id: v.harvest_week_end_id.clone(),
            prune_week_start_id: opt(&v.prune_week_start_id),
            prune_week_end_id: opt(&v.prune_week_end_id),
            notes: opt(&v.notes),
            is_public: v.is_public,
        }
    }

    /// Human label for a field name.
    pub fn label(field: &str) -> &'static str {
        match field {
            "variety_name" => "Variety name",
            "family_id" => "Plant family",
            "lifecycle_id" => "Lifecycle",
            "sow_week_start_id" => "Sow week start",
            "sow_week_end_id" => "Sow week end",
            "transplant_week_start_id" => "Transplant week start",
            "transplant_week_end_id" => "Transplant week end",
            "planting_conditions_id" => "Planting conditions",
            "soil_ph" => "Soil pH",
            "plant_depth_cm" => "Plant depth (cm)",
            "plant_space_cm" => "Plant spacing (cm)",
            "row_width_cm" => "Row width (cm)",
            "feed_id" => "Feed",
            "feed_week_start_id" => "Feed start week",
            "feed_frequency_id" => "Feed frequency",
            "water_frequency_id" => "Watering frequency",
            "high_temp_degrees" => "High temperature",
            "high_temp_water_frequency_id" => "High temperature watering frequency",
            "harvest_week_start_id" => "Harvest week start",
            "harvest_week_end_id" => "Harvest week end",
            "prune_week_start_id" => "Prune week start",
            "prune_week_end_id" => "Prune week end",
            "notes" => "Notes",
            _ => "Field",
        }
    }

    pub fn get(&self, field: &str) -> &str {
        self.slot(field).map(|s| s.as_str()).unwrap_or_default()
    }

    /// Set a text field by name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        if let Some(slot) = self.slot_mut(field) {
            *slot = value;
        }
    }

    fn slot(&self, field: &str) -> Option<&String> {
        Some(match field {
            "variety_name" => &self.variety_name,
            "family_id" => &self.family_id,
            "lifecycle_id" => &self.lifecycle_id,
            "sow_week_start_id" => &self.sow_week_start_id,
            "sow_week_end_id" => &self.sow_week_end_id,
            "transplant_week_start_id" => &self.transplant_week_start_id,
            "transplant_week_end_id" => &self.transplant_week_end_id,
            "planting_conditions_id" => &self.planting_conditions_id,
            "soil_ph" => &self.soil_ph,
            "plant_depth_cm" => &self.plant_depth_cm,
            "plant_space_cm" => &self.plant_space_cm,
            "row_width_cm" => &self.row_width_cm,
            "feed_id" => &self.feed_id,
            "feed_week_start_id" => &self.feed_week_start_id,
            "feed_frequency_id" => &self.feed_frequency_id,
            "water_frequency_id" => &self.water_frequency_id,
            "high_temp_degrees" => &self.high_temp_degrees,
            "high_temp_water_frequency_id" => &self.high_temp_water_frequency_id,
            "harvest_week_start_id" => &self.harvest_week_start_id,
            "harvest_week_end_id" => &self.harvest_week_end_id,
            "prune_week_start_id" => &self.prune_week_start_id,
            "prune_week_end_id" => &self.prune_week_end_id,
            "notes" => &self.notes,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut String> {
        Some(match field {
            "variety_name" => &mut self.variety_name,
            "family_id" => &mut self.family_id,
            "lifecycle_id" => &mut self.lifecycle_id,
            "sow_week_start_id" => &mut self.sow_week_start_id,
            "sow_week_end_id" => &mut self.sow_week_end_id,
            "transplant_week_start_id" => &mut self.transplant_week_start_id,
            "transplant_week_end_id" => &mut self.transplant_week_end_id,
            "planting_conditions_id" => &mut self.planting_conditions_id,
            "soil_ph" => &mut self.soil_ph,
            "plant_depth_cm" => &mut self.plant_depth_cm,
            "plant_space_cm" => &mut self.plant_space_cm,
            "row_width_cm" => &mut self.row_width_cm,
            "feed_id" => &mut self.feed_id,
            "feed_week_start_id" => &mut self.feed_week_start_id,
            "feed_frequency_id" => &mut self.feed_frequency_id,
            "water_frequency_id" => &mut self.water_frequency_id,
            "high_temp_degrees" => &mut self.high_temp_degrees,
            "high_temp_water_frequency_id" => &mut self.high_temp_water_frequency_id,
            "harvest_week_start_id" => &mut self.harvest_week_start_id,
            "harvest_week_end_id" => &mut self.harvest_week_end_id,
            "prune_week_start_id" => &mut self.prune_week_start_id,
            "prune_week_end_id" => &mut self.prune_week_end_id,
            "notes" => &mut self.notes,
            _ => return None,
        })
    }
}

/// Members of a field group must be all set or all blank. Every blank member
/// of a partially filled group gets an error.
fn all_or_none(
    errors: &mut FieldErrors,
    draft: &GrowGuideDraft,
    members: &[&'static str],
    group: &str,
) {
    let filled = members
        .iter()
        .filter(|f| present(draft.get(f)).is_some())
        .count();
    if filled == 0 || filled == members.len() {
        return;
    }
    for &field in members {
        if present(draft.get(field)).is_none() {
            errors.insert(
                field,
                format!(
                    "{} is required when any {group} field is set",
                    GrowGuideDraft::label(field)
                ),
            );
        }
    }
}

/// Validate a grow guide draft.
pub fn validate_grow_guide(
    draft: &GrowGuideDraft,
    rules: GrowGuideRules,
) -> Result<VarietyCreate, FieldErrors> {
    let mut errors = FieldErrors::new();
    let label = GrowGuideDraft::label;

    let variety_name = required_text(
        &mut errors,
        "variety_name",
        label("variety_name"),
        &draft.variety_name,
    );
    if variety_name.chars().count() > NAME_MAX {
        errors.insert(
            "variety_name",
            format!("Variety name must be at most {NAME_MAX} characters"),
        );
    }

    let mut id =
        |field: &'static str| required_text(&mut errors, field, label(field), draft.get(field));
    let family_id = id("family_id");
    let lifecycle_id = id("lifecycle_id");
    let sow_week_start_id = id("sow_week_start_id");
    let sow_week_end_id = id("sow_week_end_id");
    let planting_conditions_id = id("planting_conditions_id");
    let water_frequency_id = id("water_frequency_id");
    let harvest_week_start_id = id("harvest_week_start_id");
    let harvest_week_end_id = id("harvest_week_end_id");

    let soil_ph =
        required_number(&mut errors, "soil_ph", label("soil_ph"), &draft.soil_ph, SOIL_PH);
    let plant_depth_cm = required_number(
        &mut errors,
        "plant_depth_cm",
        "Plant depth",
        &draft.plant_depth_cm,
        PLANT_DEPTH,
    );
    let plant_space_cm = required_number(
        &mut errors,
        "plant_space_cm",
        "Plant spacing",
        &draft.plant_space_cm,
        PLANT_SPACE,
    );
    let row_width_cm = optional_number(
        &mut errors,
        "row_width_cm",
        "Row width",
        &draft.row_width_cm,
        ROW_WIDTH,
    );

    let high_temp_degrees = match rules.high_temp {
        HighTempRule::Required => Some(required_number(
            &mut errors,
            "high_temp_degrees",
            label("high_temp_degrees"),
            &draft.high_temp_degrees,
            HIGH_TEMP,
        )),
        HighTempRule::OptionalPair => {
            all_or_none(
                &mut errors,
                draft,
                &["high_temp_degrees", "high_temp_water_frequency_id"],
                "high temperature",
            );
            optional_number(
                &mut errors,
                "high_temp_degrees",
                label("high_temp_degrees"),
                &draft.high_temp_degrees,
                HIGH_TEMP,
            )
        }
    };

    all_or_none(
        &mut errors,
        draft,
        &["transplant_week_start_id", "transplant_week_end_id"],
        "transplant",
    );
    all_or_none(
        &mut errors,
        draft,
        &["prune_week_start_id", "prune_week_end_id"],
        "prune",
    );
    all_or_none(
        &mut errors,
        draft,
        &["feed_id", "feed_week_start_id", "feed_frequency_id"],
        "feed",
    );

    let notes = optional_text(&draft.notes);
    if let (Some(min), Some(text)) = (rules.notes_min_len, notes.as_deref()) {
        if text.chars().count() < min {
            errors.insert("notes", format!("Notes must be at least {min} characters"));
        }
    }

    errors.finish(VarietyCreate {
        variety_name,
        family_id,
        lifecycle_id,
        sow_week_start_id,
        sow_week_end_id,
        transplant_week_start_id: optional_text(&draft.transplant_week_start_id),
        transplant_week_end_id: optional_text(&draft.transplant_week_end_id),
        planting_conditions_id,
        soil_ph,
        plant_depth_cm,
        plant_space_cm,
        row_width_cm,
        feed_id: optional_text(&draft.feed_id),
        feed_week_start_id: optional_text(&draft.feed_week_start_id),
        feed_frequency_id: optional_text(&draft.feed_frequency_id),
        water_frequency_id,
        high_temp_degrees,
        high_temp_water_frequency_id: optional_text(&draft.high_temp_water_frequency_id),
        harvest_week_start_id,
        harvest_week_end_id,
        prune_week_start_id: optional_text(&draft.prune_week_start_id),
        prune_week_end_id: optional_text(&draft.prune_week_end_id),
        notes,
        is_public: draft.is_public,
    })
}
