//! Grow guide endpoints.

use serde_json::json;
use store::models::{Variety, VarietyCreate, VarietyOptions, VarietyPatch};

use crate::client::{ApiClient, Call};
use crate::error::ApiError;

const NOT_FOUND: &str = "Grow guide not found";

impl ApiClient {
    /// Guides owned by the current user.
    pub async fn list_varieties(&self) -> Result<Vec<Variety>, ApiError> {
        self.call(Call::get("/grow-guides")).await
    }

    /// Guides other users have published.
    pub async fn list_public_varieties(&self) -> Result<Vec<Variety>, ApiError> {
        self.call(Call::get("/grow-guides/public")).await
    }

    pub async fn get_variety(&self, variety_id: &str) -> Result<Variety, ApiError> {
        self.call(Call::get(format!("/grow-guides/{variety_id}")))
            .await
            .map_err(|e| e.explain(404, NOT_FOUND))
    }

    pub async fn create_variety(&self, payload: &VarietyCreate) -> Result<Variety, ApiError> {
        self.call(Call::post("/grow-guides").json(payload)?)
            .await
            .map_err(|e| e.explain(409, "A grow guide with this name already exists"))
    }

    pub async fn update_variety(
        &self,
        variety_id: &str,
        payload: &VarietyCreate,
    ) -> Result<Variety, ApiError> {
        self.call(Call::put(format!("/grow-guides/{variety_id}")).json(payload)?)
            .await
            .map_err(|e| {
                e.explain(404, NOT_FOUND)
                    .explain(409, "A grow guide with this name already exists")
            })
    }

    pub async fn set_variety_visibility(
        &self,
        variety_id: &str,
        is_public: bool,
    ) -> Result<Variety, ApiError> {
        let patch = VarietyPatch::visibility(is_public);
        self.call(Call::patch(format!("/grow-guides/{variety_id}")).json(&patch)?)
            .await
            .map_err(|e| e.explain(404, NOT_FOUND))
    }

    pub async fn delete_variety(&self, variety_id: &str) -> Result<(), ApiError> {
        self.call_unit(Call::delete(format!("/grow-guides/{variety_id}")))
            .await
            .map_err(|e| {
                e.explain(404, NOT_FOUND)
                    .explain(403, "You can only delete your own grow guides")
            })
    }

    /// Copy a public guide into the current user's collection.
    pub async fn copy_variety(&self, variety_id: &str) -> Result<Variety, ApiError> {
        self.call(Call::post(format!("/grow-guides/{variety_id}/copy")))
            .await
            .map_err(|e| {
                e.explain(404, NOT_FOUND)
                    .explain(409, "You already have a grow guide with this name")
            })
    }

    pub async fn variety_options(&self) -> Result<VarietyOptions, ApiError> {
        self.call(Call::get("/grow-guides/metadata")).await
    }

    /// Mark or unmark a guide as one the user is growing this season.
    pub async fn set_variety_active(&self, variety_id: &str, active: bool) -> Result<(), ApiError> {
        let call = if active {
            Call::post("/users/active-varieties").json(&json!({ "variety_id": variety_id }))?
        } else {
            Call::delete(format!("/users/active-varieties/{variety_id}"))
        };
        self.call_unit(call)
            .await
            .map_err(|e| e.explain(404, NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{client_for, variety_json};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn lists_own_and_public_guides() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/grow-guides");
                then.status(200)
                    .json_body(json!([variety_json("v1", "Carrot"), variety_json("v2", "Leek")]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/grow-guides/public");
                then.status(200).json_body(json!([variety_json("p1", "Tomato")]));
            })
            .await;

        let client = client_for(&server);
        let own = client.list_varieties().await.unwrap();
        assert_eq!(own.len(), 2);
        assert_eq!(own[1].variety_name, "Leek");

        let public = client.list_public_varieties().await.unwrap();
        assert_eq!(public[0].variety_id, "p1");
    }

    #[tokio::test]
    async fn missing_guide_has_friendly_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/grow-guides/nope");
                then.status(404);
            })
            .await;

        let err = client_for(&server).get_variety("nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Grow guide not found");
    }

    #[tokio::test]
    async fn visibility_toggle_sends_patch() {
        let server = MockServer::start_async().await;
        let mut public = variety_json("v1", "Carrot");
        public["is_public"] = json!(true);
        let mock = server
            .mock_async(move |when, then| {
                when.method(PATCH)
                    .path("/grow-guides/v1")
                    .json_body(json!({"is_public": true}));
                then.status(200).json_body(public);
            })
            .await;

        let updated = client_for(&server)
            .set_variety_visibility("v1", true)
            .await
            .unwrap();
        assert!(updated.is_public);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_conflict_keeps_backend_detail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/grow-guides/v1");
                then.status(403)
                    .json_body(json!({"detail": "Guide is in use by an active plan"}));
            })
            .await;

        let err = client_for(&server).delete_variety("v1").await.unwrap_err();
        assert_eq!(err.user_message(), "Guide is in use by an active plan");
    }

    #[tokio::test]
    async fn copy_conflict_is_explained() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/grow-guides/p1/copy");
                then.status(409);
            })
            .await;

        let err = client_for(&server).copy_variety("p1").await.unwrap_err();
        assert_eq!(err.user_message(), "You already have a grow guide with this name");
    }

    #[tokio::test]
    async fn active_toggle_uses_user_collection() {
        let server = MockServer::start_async().await;
        let add = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/users/active-varieties")
                    .json_body(json!({"variety_id": "v1"}));
                then.status(201);
            })
            .await;
        let remove = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/users/active-varieties/v1");
                then.status(204);
            })
            .await;

        let client = client_for(&server);
        client.set_variety_active("v1", true).await.unwrap();
        client.set_variety_active("v1", false).await.unwrap();
        add.assert_async().await;
        remove.assert_async().await;
    }

    #[tokio::test]
    async fn options_decode() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/grow-guides/metadata");
                then.status(200).json_body(json!({
                    "families": [{"family_id": "fam-1", "family_name": "Brassicaceae"}],
                    "frequencies": [{
                        "frequency_id": "daily",
                        "frequency_name": "Daily",
                        "frequency_days_per_year": 365
                    }]
                }));
            })
            .await;

        let options = client_for(&server).variety_options().await.unwrap();
        assert_eq!(options.families.len(), 1);
        assert_eq!(options.frequency_label("daily"), Some("Daily"));
        assert!(options.weeks.is_empty());
    }
}
