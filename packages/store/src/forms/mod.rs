//! # Form validation
//!
//! Each form is a "draft" struct of raw input strings. Validating a draft
//! either yields the typed payload the [`api`](../../api) crate sends, or a
//! [`FieldErrors`] map with one message per offending field for inline
//! display. Every rule runs, so independent errors are reported together.
//!
//! | Draft | Output |
//! |-------|--------|
//! | [`GrowGuideDraft`] | [`VarietyCreate`](crate::models::VarietyCreate) |
//! | [`AllotmentDraft`] | [`AllotmentPayload`](crate::models::AllotmentPayload) |
//! | [`ProfileDraft`] | [`ProfileUpdate`](crate::models::ProfileUpdate) |
//! | [`LoginDraft`] | [`LoginRequest`](crate::models::LoginRequest) |
//! | [`RegisterDraft`] | [`RegisterRequest`](crate::models::RegisterRequest) |
//! | [`PasswordResetDraft`] | the new password |

use std::collections::BTreeMap;
use std::fmt;

mod account;
mod grow_guide;

pub use account::{
    validate_allotment, validate_login, validate_password_reset, validate_profile,
    validate_register, AllotmentDraft, LoginDraft, PasswordResetDraft, ProfileDraft,
    RegisterDraft,
};
pub use grow_guide::{validate_grow_guide, GrowGuideDraft, GrowGuideRules, HighTempRule};

/// Field name → first error message for that field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a field wins.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn messages(&self) -> Vec<&str> {
        self.0.values().map(String::as_str).collect()
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn present(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parse a numeric input. Blank is `Ok(None)`.
pub(crate) fn parse_number(raw: &str, label: &str) -> Result<Option<f64>, String> {
    let Some(text) = present(raw) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(format!("{label} must be a valid number")),
    }
}

/// Inclusive numeric bounds for a field.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, value: f64, label: &str) -> Result<f64, String> {
        if value < self.min || value > self.max {
            Err(format!("{label} must be between {} and {}", self.min, self.max))
        } else {
            Ok(value)
        }
    }
}

/// A required number; records an error and returns `0.0` when invalid.
pub(crate) fn required_number(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
    range: Range,
) -> f64 {
    match parse_number(raw, label) {
        Ok(Some(n)) => range.check(n, label).unwrap_or_else(|msg| {
            errors.insert(field, msg);
            0.0
        }),
        Ok(None) => {
            errors.insert(field, format!("{label} is required"));
            0.0
        }
        Err(msg) => {
            errors.insert(field, msg);
            0.0
        }
    }
}

/// An optional number; blank is `None`.
pub(crate) fn optional_number(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
    range: Range,
) -> Option<f64> {
    match parse_number(raw, label) {
        Ok(Some(n)) => match range.check(n, label) {
            Ok(n) => Some(n),
            Err(msg) => {
                errors.insert(field, msg);
                None
            }
        },
        Ok(None) => None,
        Err(msg) => {
            errors.insert(field, msg);
            None
        }
    }
}

/// A required text/identifier; records "<label> is required" when blank.
pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> String {
    match present(raw) {
        Some(value) => value.to_string(),
        None => {
            errors.insert(field, format!("{label} is required"));
            String::new()
        }
    }
}

pub(crate) fn optional_text(raw: &str) -> Option<String> {
    present(raw).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_number_is_absent() {
        assert_eq!(parse_number("  ", "Row width"), Ok(None));
    }

    #[test]
    fn non_numeric_is_rejected() {
        assert_eq!(
            parse_number("abc", "Soil pH"),
            Err("Soil pH must be a valid number".to_string())
        );
        assert!(parse_number("NaN", "Soil pH").is_err());
        assert!(parse_number("inf", "Soil pH").is_err());
    }

    #[test]
    fn required_blank_says_required_not_number() {
        let mut errors = FieldErrors::new();
        required_number(&mut errors, "soil_ph", "Soil pH", "", Range::new(0.0, 14.0));
        assert_eq!(errors.get("soil_ph"), Some("Soil pH is required"));
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("notes", "first");
        errors.insert("notes", "second");
        assert_eq!(errors.get("notes"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn range_message_formats_whole_bounds() {
        let err = Range::new(-50.0, 60.0).check(61.0, "High temperature").unwrap_err();
        assert_eq!(err, "High temperature must be between -50 and 60");
    }
}
