//! # Error taxonomy for backend calls
//!
//! Every endpoint returns [`ApiError`]. The UI never shows the `Display` form;
//! it shows [`ApiError::user_message`], which prefers the backend's `detail`
//! and otherwise falls back to a status-specific sentence.
//!
//! ## `detail` formats
//!
//! The backend reports errors as `{"detail": ...}` where `detail` is either a
//! string or a list of validation issues:
//!
//! ```json
//! {"detail": [{"loc": ["body", "variety_name"], "msg": "field required", "type": "missing"}]}
//! ```
//!
//! [`format_detail`] turns either shape into one line
//! (`"variety_name: field required"`; issues joined with `"; "`).

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_status(&self, code: u16) -> bool {
        self.status() == Some(code)
    }

    /// Only transport failures and server errors can succeed on a retry.
    /// Client errors (401, 403, 404, 409, 422, ...) never change outcome.
    pub fn should_retry(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout => true,
            ApiError::Http { status, .. } => (500..=599).contains(status),
            ApiError::Decode(_) => false,
        }
    }

    /// Give a detail-less response for `status` a call-specific message.
    pub fn explain(self, status: u16, message: &str) -> Self {
        match self {
            ApiError::Http { status: s, detail: None } if s == status => ApiError::Http {
                status: s,
                detail: Some(message.to_string()),
            },
            other => other,
        }
    }

    /// The one string the UI displays.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            ApiError::Timeout => "The request timed out. Please try again.".to_string(),
            ApiError::Decode(_) => "Unexpected response from the server.".to_string(),
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Http { status, detail: None } => status_message(*status),
        }
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "The request was invalid.".to_string(),
        401 => "Please log in to continue.".to_string(),
        403 => "You don't have permission to do that.".to_string(),
        404 => "Not found.".to_string(),
        409 => "This conflicts with existing data.".to_string(),
        410 => "This link has expired. Please request a new one.".to_string(),
        422 => "Some fields are invalid. Please check your input.".to_string(),
        503 => "The service is temporarily unavailable. Please try again later.".to_string(),
        500..=599 => "Server error. Please try again later.".to_string(),
        other => format!("Unexpected error (status {other})."),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Issues(Vec<Issue>),
}

#[derive(Deserialize)]
struct Issue {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl Issue {
    fn render(&self) -> String {
        let field = self
            .loc
            .iter()
            .rev()
            .filter_map(|v| v.as_str())
            .find(|s| *s != "body" && *s != "query" && *s != "path");
        match field {
            Some(field) => format!("{field}: {}", self.msg),
            None => self.msg.clone(),
        }
    }
}

/// Extract a readable message from an error body, if it has a `detail`.
pub fn format_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Detail::Message(msg) if !msg.trim().is_empty() => Some(msg),
        Detail::Message(_) => None,
        Detail::Issues(issues) if !issues.is_empty() => Some(
            issues
                .iter()
                .map(Issue::render)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Detail::Issues(_) => None,
    }
}

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        assert_eq!(
            format_detail(r#"{"detail": "Variety name already exists"}"#).as_deref(),
            Some("Variety name already exists")
        );
    }

    #[test]
    fn issue_list_is_joined() {
        let body = r#"{"detail": [
            {"loc": ["body", "variety_name"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "soil_ph"], "msg": "must be <= 14", "type": "less_than_equal"},
            {"loc": [], "msg": "bad payload", "type": "value_error"}
        ]}"#;
        assert_eq!(
            format_detail(body).as_deref(),
            Some("variety_name: field required; soil_ph: must be <= 14; bad payload")
        );
    }

    #[test]
    fn missing_or_malformed_detail_is_none() {
        assert_eq!(format_detail("<html>502</html>"), None);
        assert_eq!(format_detail(r#"{"error": "x"}"#), None);
        assert_eq!(format_detail(r#"{"detail": []}"#), None);
    }

    #[test]
    fn retry_classification() {
        let http = |status| ApiError::Http { status, detail: None };
        assert!(ApiError::Network("reset".into()).should_retry());
        assert!(ApiError::Timeout.should_retry());
        assert!(http(500).should_retry());
        assert!(http(503).should_retry());
        for status in [400, 401, 403, 404, 409, 410, 422] {
            assert!(!http(status).should_retry(), "{status} must not retry");
        }
    }

    #[test]
    fn explain_only_fills_missing_detail_for_matching_status() {
        let err = ApiError::Http { status: 404, detail: None }.explain(404, "Grow guide not found");
        assert_eq!(err.user_message(), "Grow guide not found");

        let kept = ApiError::Http {
            status: 404,
            detail: Some("No such variety".into()),
        }
        .explain(404, "Grow guide not found");
        assert_eq!(kept.user_message(), "No such variety");

        let other = ApiError::Http { status: 500, detail: None }
            .explain(404, "Grow guide not found");
        assert_eq!(other.user_message(), "Server error. Please try again later.");
    }
}
