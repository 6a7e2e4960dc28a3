//! HTTP plumbing shared by every endpoint: URL building, bearer auth,
//! retries, error mapping and reporting.

use std::sync::Arc;
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::config::{ClientConfig, RetryConfig};

use crate::error::{format_detail, map_reqwest_error, ApiError};
use crate::report::{CallContext, ErrorReporter, TracingReporter};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Extra attempts for GET requests.
    pub query_attempts: usize,
    /// Extra attempts for everything else.
    pub mutation_attempts: usize,
    pub delay: Duration,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            query_attempts: config.query_attempts,
            mutation_attempts: config.mutation_attempts,
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

/// Client for the Grow Guides backend.
///
/// Cheap to clone; clones share the connection pool and reporter.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    retry: RetryPolicy,
    reporter: Arc<dyn ErrorReporter>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token && self.retry == other.retry
    }
}

fn build_http(config: &ClientConfig) -> Result<Client, ApiError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(concat!("grow-guides-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))
    }
    #[cfg(target_arch = "wasm32")]
    {
        // The browser's fetch owns timeouts.
        let _ = config;
        Ok(Client::new())
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.base_url().to_string(),
            token: None,
            retry: RetryPolicy::from(&config.retry),
            reporter: Arc::new(TracingReporter),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn call<T: DeserializeOwned>(&self, call: Call) -> Result<T, ApiError> {
        let body = self.send(&call).await?;
        serde_json::from_str(&body).map_err(|e| self.fail(&call, ApiError::Decode(e.to_string())))
    }

    pub(crate) async fn call_unit(&self, call: Call) -> Result<(), ApiError> {
        self.send(&call).await.map(|_| ())
    }

    async fn send(&self, call: &Call) -> Result<String, ApiError> {
        let extra_attempts = if call.method == Method::GET {
            self.retry.query_attempts
        } else {
            self.retry.mutation_attempts
        };

        (|| async { self.send_once(call).await })
            .retry(
                ConstantBuilder::default()
                    .with_delay(self.retry.delay)
                    .with_max_times(extra_attempts),
            )
            .when(ApiError::should_retry)
            .notify(|e, dur| {
                tracing::warn!(
                    method = %call.method,
                    path = %call.path,
                    "call failed, retrying after {:.2}s: {e}",
                    dur.as_secs_f64()
                )
            })
            .await
            .map_err(|e| self.fail(call, e))
    }

    async fn send_once(&self, call: &Call) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, call.path);
        let mut req = self.http.request(call.method.clone(), &url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if !call.query.is_empty() {
            req = req.query(&call.query);
        }
        if let Some(json) = &call.json {
            req = req.json(json);
        }
        if let Some(form) = &call.form {
            req = req.form(form);
        }

        let res = req.send().await.map_err(map_reqwest_error)?;
        let status = res.status();
        let body = res.text().await.map_err(map_reqwest_error)?;
        tracing::debug!(method = %call.method, path = %call.path, status = status.as_u16());

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::Http {
                status: status.as_u16(),
                detail: format_detail(&body),
            })
        }
    }

    fn fail(&self, call: &Call, error: ApiError) -> ApiError {
        if !call.expected.iter().any(|s| error.is_status(*s)) {
            self.reporter.report(&error, &call.context());
        }
        error
    }
}

/// One backend request, described before it is sent so it can be retried.
#[derive(Clone, Debug)]
pub(crate) struct Call {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    json: Option<serde_json::Value>,
    form: Option<Vec<(&'static str, String)>>,
    /// Carries credentials; never reported with its payload.
    sensitive: bool,
    /// Statuses the caller handles itself; not reported.
    expected: Vec<u16>,
}

impl Call {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            json: None,
            form: None,
            sensitive: false,
            expected: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.json = Some(value);
        Ok(self)
    }

    pub fn form(mut self, fields: Vec<(&'static str, String)>) -> Self {
        self.form = Some(fields);
        self
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected.push(status);
        self
    }

    fn context(&self) -> CallContext {
        CallContext {
            method: self.method.to_string(),
            endpoint: self.path.clone(),
            payload: if self.sensitive {
                None
            } else {
                self.json.as_ref().map(|v| v.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_for, RecordingReporter};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn attaches_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/grow-guides")
                    .header("authorization", "Bearer secret-token");
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = client_for(&server).with_token("secret-token");
        let list: Vec<serde_json::Value> = client.call(Call::get("/grow-guides")).await.unwrap();
        assert!(list.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_errors_are_retried_for_reads() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/grow-guides");
                then.status(500);
            })
            .await;

        let err = client_for(&server)
            .call_unit(Call::get("/grow-guides"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        // one attempt plus two retries
        mock.assert_hits_async(3).await;
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/profile");
                then.status(401).json_body(json!({"detail": "Could not validate credentials"}));
            })
            .await;

        let err = client_for(&server)
            .call_unit(Call::get("/users/profile"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Could not validate credentials");
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn mutations_are_not_retried_by_default() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/grow-guides/v1");
                then.status(502);
            })
            .await;

        let result = client_for(&server)
            .call_unit(Call::delete("/grow-guides/v1"))
            .await;
        assert!(result.is_err());
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn failures_reach_reporter_without_secrets() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/token");
                then.status(401);
            })
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let client = client_for(&server).with_reporter(reporter.clone());
        let call = Call::post("/auth/token")
            .json(&json!({"password": "hunter22"}))
            .unwrap()
            .sensitive();
        let _ = client.call_unit(call).await;

        let seen = reporter.calls();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1.method, "POST");
        assert_eq!(seen[0].1.endpoint, "/auth/token");
        assert_eq!(seen[0].1.payload, None);
    }

    #[tokio::test]
    async fn expected_statuses_are_not_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/allotment");
                then.status(404);
            })
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let client = client_for(&server).with_reporter(reporter.clone());
        let err = client
            .call_unit(Call::get("/users/allotment").expect_status(404))
            .await
            .unwrap_err();
        assert!(err.is_status(404));
        assert!(reporter.calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/grow-guides/metadata");
                then.status(200).body("not json");
            })
            .await;

        let err = client_for(&server)
            .call::<store::VarietyOptions>(Call::get("/grow-guides/metadata"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.user_message(), "Unexpected response from the server.");
    }
}
