use std::sync::{Arc, Mutex};
use std::time::Duration;

use httpmock::MockServer;
use serde_json::{json, Value};
use store::ClientConfig;

use crate::client::{ApiClient, RetryPolicy};
use crate::error::ApiError;
use crate::report::{CallContext, ErrorReporter};

/// A client pointed at `server` with near-zero retry delay.
pub(crate) fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::default().with_base_url(server.base_url());
    ApiClient::new(&config)
        .expect("client builds")
        .with_retry(RetryPolicy {
            query_attempts: 2,
            mutation_attempts: 0,
            delay: Duration::from_millis(1),
        })
        .with_reporter(Arc::new(RecordingReporter::default()))
}

#[derive(Default)]
pub(crate) struct RecordingReporter {
    seen: Mutex<Vec<(ApiError, CallContext)>>,
}

impl RecordingReporter {
    pub(crate) fn calls(&self) -> Vec<(ApiError, CallContext)> {
        self.seen.lock().expect("reporter lock").clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &ApiError, context: &CallContext) {
        self.seen
            .lock()
            .expect("reporter lock")
            .push((error.clone(), context.clone()));
    }
}

pub(crate) fn variety_json(id: &str, name: &str) -> Value {
    json!({
        "variety_id": id,
        "variety_name": name,
        "owner_user_id": "user-1",
        "family": {"family_id": "fam-1", "family_name": "Apiaceae"},
        "sow_week_start_id": "w10",
        "sow_week_end_id": "w14",
        "planting_conditions_id": "outdoors",
        "soil_ph": 6.5,
        "plant_depth_cm": 1.0,
        "plant_space_cm": 5.0,
        "water_frequency_id": "weekly",
        "high_temp_degrees": 25.0,
        "high_temp_water_frequency_id": "daily",
        "harvest_week_start_id": "w30",
        "harvest_week_end_id": "w36",
        "is_public": false,
        "last_updated": "2024-05-01T10:00:00Z"
    })
}
