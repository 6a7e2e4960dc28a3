//! Error reporting hook for failed backend calls.

use crate::error::ApiError;

/// What was being attempted when a call failed.
#[derive(Clone, Debug, PartialEq)]
pub struct CallContext {
    pub method: String,
    pub endpoint: String,
    /// JSON body, omitted for calls carrying credentials.
    pub payload: Option<String>,
}

/// Receives every failed call after retries are exhausted.
pub trait ErrorReporter {
    fn report(&self, error: &ApiError, context: &CallContext);
}

/// Default reporter: one `tracing` event per failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &ApiError, context: &CallContext) {
        match error.status() {
            Some(status) if status < 500 => tracing::warn!(
                method = %context.method,
                endpoint = %context.endpoint,
                status,
                "{error}"
            ),
            _ => tracing::error!(
                method = %context.method,
                endpoint = %context.endpoint,
                payload = context.payload.as_deref().unwrap_or("-"),
                "{error}"
            ),
        }
    }
}
