//! Review Registration Handler

use std::sync::Arc;

use fishery::ids::RegistrationId;
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
    registrations::models::{RegistrationResponse, ReviewDecisionParam},
    state::State,
};

/// Review Registration Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewRequest {
    /// Approve or reject
    pub decision: ReviewDecisionParam,

    /// Optional remarks recorded in the history
    pub remarks: Option<String>,
}

/// Review Registration Handler
#[endpoint(
    tags("registrations"),
    summary = "Review Registration",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Registration reviewed"),
        (status_code = StatusCode::FORBIDDEN, description = "Only MAO staff and inspectors review"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::CONFLICT, description = "Registration is not pending"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<ReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let ReviewRequest { decision, remarks } = json.into_inner();

    let registration = state
        .app
        .registrations
        .review(
            actor,
            RegistrationId::new(id.into_inner()),
            decision.into(),
            remarks,
        )
        .await
        .map_err(into_status_error)?;

    record_transition("registration", "review");

    Ok(Json(registration.into()))
}

#[cfg(test)]
mod tests {
    use fishery::{
        actors::Role,
        errors::WorkflowError,
        registrations::{RegistrationStatus, ReviewDecision},
    };
    use fishery_app::domain::registrations::MockRegistrationsService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{make_registration, registrations_service};

    use super::*;

    fn make_service(registrations: MockRegistrationsService) -> Service {
        registrations_service(
            registrations,
            Router::with_path("registrations/{id}/review").post(handler),
        )
    }

    #[tokio::test]
    async fn test_review_forwards_decision_and_remarks() -> TestResult {
        let mut registrations = MockRegistrationsService::new();

        registrations
            .expect_review()
            .once()
            .withf(|_, id, decision, remarks| {
                id.as_str() == "GEAR-4"
                    && *decision == ReviewDecision::Reject
                    && remarks.as_deref() == Some("photos missing")
            })
            .return_once(|_, _, _, _| Ok(make_registration("GEAR-4", RegistrationStatus::Rejected)));

        let mut res = TestClient::post("http://example.com/registrations/GEAR-4/review")
            .json(&json!({ "decision": "reject", "remarks": "photos missing" }))
            .send(&make_service(registrations))
            .await;

        let body: RegistrationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "Rejected");

        Ok(())
    }

    #[tokio::test]
    async fn test_review_by_fisherfolk_returns_403() -> TestResult {
        let mut registrations = MockRegistrationsService::new();

        registrations.expect_review().once().return_once(|_, _, _, _| {
            Err(WorkflowError::Forbidden {
                role: Role::Fisherfolk,
                action: "review a registration",
            }
            .into())
        });

        let res = TestClient::post("http://example.com/registrations/GEAR-4/review")
            .json(&json!({ "decision": "approve" }))
            .send(&make_service(registrations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
