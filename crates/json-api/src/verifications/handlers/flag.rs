//! Set Verification Flag Handler

use std::sync::Arc;

use fishery::ids::UserId;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::into_status_error,
    extensions::*,
    observability::record_transition,
    state::State,
    verifications::models::{FlagStatusParam, RegistryParam, VerificationResponse},
};

/// Set Verification Flag Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FlagRequest {
    /// New status for the registry
    pub status: FlagStatusParam,
}

/// Set Verification Flag Handler
///
/// Also rewrites the `boatr_verified`/`fishr_verified` projection on every registration
/// the owner holds.
#[endpoint(
    tags("verifications"),
    summary = "Set Verification Flag",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Flag updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO sets flags"),
        (status_code = StatusCode::NOT_FOUND, description = "No submission for this owner"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<String>,
    flag: PathParam<RegistryParam>,
    json: JsonBody<FlagRequest>,
    depot: &mut Depot,
) -> Result<Json<VerificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let view = state
        .app
        .verification
        .set_flag(
            actor,
            UserId::new(owner.into_inner()),
            flag.into_inner().into(),
            json.into_inner().status.into(),
        )
        .await
        .map_err(into_status_error)?;

    record_transition("verification", "set_flag");

    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use fishery::verification::{FlagStatus, Registry};
    use fishery_app::domain::verification::MockVerificationService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{make_verification, verification_service};

    use super::*;

    #[tokio::test]
    async fn test_set_flag_forwards_registry_and_status() -> TestResult {
        let mut verification = MockVerificationService::new();

        verification
            .expect_set_flag()
            .once()
            .withf(|_, owner, registry, status| {
                owner.as_str() == "owner-1"
                    && *registry == Registry::BoatR
                    && *status == FlagStatus::Approved
            })
            .return_once(|_, _, _, _| {
                Ok(make_verification(FlagStatus::Approved, FlagStatus::Approved))
            });

        let service = verification_service(
            verification,
            Router::with_path("verifications/{owner}/{flag}").put(handler),
        );

        let mut res = TestClient::put("http://example.com/verifications/owner-1/boatr")
            .json(&json!({ "status": "approved" }))
            .send(&service)
            .await;

        let body: VerificationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.overall_status, "Approved");

        Ok(())
    }
}
