//! Get Verification Handler

use std::sync::Arc;

use fishery::ids::UserId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, state::State,
    verifications::models::VerificationResponse,
};

/// Get Verification Handler
#[endpoint(
    tags("verifications"),
    summary = "Get Verification Submission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Submission found"),
        (status_code = StatusCode::FORBIDDEN, description = "Submission belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "No submission for this owner"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<VerificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let view = state
        .app
        .verification
        .get(actor, UserId::new(owner.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use fishery::verification::FlagStatus;
    use fishery_app::domain::verification::MockVerificationService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{make_verification, verification_service};

    use super::*;

    #[tokio::test]
    async fn test_get_derives_overall_status() -> TestResult {
        let mut verification = MockVerificationService::new();

        verification
            .expect_get()
            .once()
            .withf(|_, owner| owner.as_str() == "owner-1")
            .return_once(|_, _| Ok(make_verification(FlagStatus::Approved, FlagStatus::Rejected)));

        let service = verification_service(
            verification,
            Router::with_path("verifications/{owner}").get(handler),
        );

        let body: VerificationResponse = TestClient::get("http://example.com/verifications/owner-1")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.fishr_status, "Approved");
        assert_eq!(body.boatr_status, "Rejected");
        assert_eq!(body.overall_status, "Rejected");

        Ok(())
    }
}
