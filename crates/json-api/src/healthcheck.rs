//! Fishery JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Seconds since the server started
    pub uptime_seconds: u64,
}

/// Healthcheck handler
///
/// Opens and drops a store transaction, so a `503` means the document store is unreachable.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service and store are up"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Store unreachable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Err(source) = state.app.store.begin().await {
        error!("healthcheck could not reach the store: {source}");

        return Err(StatusError::service_unavailable());
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.started.elapsed().as_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use fishery_app::auth::MockAuthService;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::state_with_auth;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck() -> TestResult {
        let router = Router::new()
            .hoop(inject(state_with_auth(MockAuthService::new())))
            .push(Router::with_path("healthcheck").get(handler));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");

        Ok(())
    }
}
