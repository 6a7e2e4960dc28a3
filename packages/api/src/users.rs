//! Per-user resources: allotment, profile, feed preferences, email
//! verification and password resets.

use serde_json::json;
use store::models::{
    Allotment, AllotmentPayload, FeedDay, Preferences, ProfileUpdate, UserProfile,
    VerificationStatus,
};

use crate::client::{ApiClient, Call};
use crate::error::ApiError;

const EMAIL_UNAVAILABLE: &str = "Email service is unavailable. Please try again later.";
const NO_ACCOUNT: &str = "No account found with this email";

impl ApiClient {
    /// The user's allotment, or `None` if they have not created one yet.
    pub async fn get_allotment(&self) -> Result<Option<Allotment>, ApiError> {
        match self
            .call(Call::get("/users/allotment").expect_status(404))
            .await
        {
            Ok(allotment) => Ok(Some(allotment)),
            Err(e) if e.is_status(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_allotment(
        &self,
        payload: &AllotmentPayload,
    ) -> Result<Allotment, ApiError> {
        self.call(Call::post("/users/allotment").json(payload)?)
            .await
            .map_err(|e| e.explain(409, "You already have an allotment"))
    }

    pub async fn update_allotment(
        &self,
        payload: &AllotmentPayload,
    ) -> Result<Allotment, ApiError> {
        self.call(Call::put("/users/allotment").json(payload)?)
            .await
            .map_err(|e| e.explain(404, "No allotment to update"))
    }

    /// Create on first save, replace afterwards.
    pub async fn save_allotment(
        &self,
        payload: &AllotmentPayload,
        exists: bool,
    ) -> Result<Allotment, ApiError> {
        if exists {
            self.update_allotment(payload).await
        } else {
            self.create_allotment(payload).await
        }
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.call(Call::get("/users/profile")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.call(Call::put("/users/profile").json(update)?).await
    }

    pub async fn get_preferences(&self) -> Result<Preferences, ApiError> {
        self.call(Call::get("/users/preferences")).await
    }

    pub async fn update_feed_day(&self, feed_id: &str, day_id: &str) -> Result<FeedDay, ApiError> {
        self.call(
            Call::put(format!("/users/preferences/{feed_id}")).json(&json!({ "day_id": day_id }))?,
        )
        .await
    }

    pub async fn verification_status(&self, email: &str) -> Result<VerificationStatus, ApiError> {
        self.call(Call::get("/users/verification-status").query("user_email", email))
            .await
            .map_err(|e| e.explain(404, NO_ACCOUNT))
    }

    pub async fn request_verification_email(&self, email: &str) -> Result<(), ApiError> {
        let body = json!({ "user_email": email });
        self.call_unit(Call::post("/users/email-verifications").json(&body)?)
            .await
            .map_err(|e| e.explain(503, EMAIL_UNAVAILABLE).explain(404, NO_ACCOUNT))
    }

    pub async fn confirm_email(&self, token: &str) -> Result<(), ApiError> {
        self.call_unit(Call::post(format!("/users/email-verifications/{token}")).sensitive())
            .await
            .map_err(|e| {
                e.explain(410, "This verification link has expired")
                    .explain(404, "Invalid verification link")
            })
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.call_unit(Call::post("/users/password-resets").json(&json!({ "user_email": email }))?)
            .await
            .map_err(|e| e.explain(503, EMAIL_UNAVAILABLE).explain(404, NO_ACCOUNT))
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let call = Call::post(format!("/users/password-resets/{token}"))
            .json(&json!({ "new_password": new_password }))?
            .sensitive();
        self.call_unit(call).await.map_err(|e| {
            e.explain(410, "This reset link has expired")
                .explain(400, "Invalid reset link")
        })
    }
}
