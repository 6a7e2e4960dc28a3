//! Login and registration.
//!
//! Both return a [`TokenResponse`]; the caller attaches the token with
//! [`ApiClient::with_token`]. Credentials are never included in reports.

use store::models::{LoginRequest, RegisterRequest, TokenResponse};

use crate::client::{ApiClient, Call};
use crate::error::ApiError;

impl ApiClient {
    /// OAuth2 password flow: form-encoded `username` and `password`.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let call = Call::post("/auth/token")
            .form(vec![
                ("username", request.user_email.clone()),
                ("password", request.user_password.clone()),
            ])
            .sensitive();
        self.call(call).await.map_err(|e| {
            e.explain(401, "Invalid email or password")
                .explain(403, "This account is locked. Please reset your password.")
        })
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        let call = Call::post("/users").json(request)?.sensitive();
        self.call(call)
            .await
            .map_err(|e| e.explain(409, "An account with this email already exists"))
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client_for;
    use httpmock::prelude::*;
    use serde_json::json;
    use store::models::{LoginRequest, RegisterRequest};

    #[tokio::test]
    async fn login_posts_form_and_returns_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/token")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .form_urlencoded_tuple("username", "grower@example.com")
                    .form_urlencoded_tuple("password", "secret123");
                then.status(200).json_body(json!({
                    "access_token": "tok",
                    "token_type": "bearer",
                    "user_id": "user-1",
                    "is_email_verified": false
                }));
            })
            .await;

        let token = client_for(&server)
            .login(&LoginRequest {
                user_email: "grower@example.com".into(),
                user_password: "secret123".into(),
            })
            .await
            .unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.is_email_verified, Some(false));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bad_credentials_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/token");
                then.status(401);
            })
            .await;

        let err = client_for(&server)
            .login(&LoginRequest {
                user_email: "grower@example.com".into(),
                user_password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn duplicate_registration() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/users");
                then.status(409);
            })
            .await;

        let err = client_for(&server)
            .register(&RegisterRequest {
                user_email: "grower@example.com".into(),
                user_password: "secret123".into(),
                user_first_name: "Sam".into(),
                user_country_code: "GB".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "An account with this email already exists");
    }
}
