//! # API crate: typed client for the Grow Guides backend
//!
//! Every frontend call to the backend goes through [`ApiClient`]. Endpoints are
//! plain `async fn`s grouped by resource; each returns `Result<_, ApiError>` and
//! never panics on a bad response.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `reqwest` wrapper: base URL, bearer token, retries (`backon`), error reporting |
//! | [`error`] | [`ApiError`] and the backend `detail` formatter |
//! | [`report`] | [`ErrorReporter`] hook; the default logs through `tracing` |
//! | `varieties` | Grow guides: CRUD, visibility, copy, editor options, active flag |
//! | `users` | Allotment, profile, feed preferences, email verification, password reset |
//! | `auth` | Login (form-encoded password flow) and registration |
//!
//! ## Retries
//!
//! Reads are retried on network errors, timeouts and 5xx responses. Mutations
//! are not retried unless configured. A 4xx is never retried.

pub mod client;
pub mod error;
pub mod report;

mod auth;
mod users;
mod varieties;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, RetryPolicy};
pub use error::{format_detail, ApiError};
pub use report::{CallContext, ErrorReporter, TracingReporter};

pub use store::models::{
    Allotment, AllotmentPayload, FeedDay, LoginRequest, Preferences, ProfileUpdate,
    RegisterRequest, TokenResponse, UserProfile, Variety, VarietyCreate, VarietyOptions,
    VerificationStatus,
};
