//! Get Registration Handler

use std::sync::Arc;

use fishery::ids::RegistrationId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, registrations::models::RegistrationResponse,
    state::State,
};

/// Get Registration Handler
#[endpoint(
    tags("registrations"),
    summary = "Get Registration",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Registration found"),
        (status_code = StatusCode::FORBIDDEN, description = "Registration belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let registration = state
        .app
        .registrations
        .get(actor, RegistrationId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(registration.into()))
}

#[cfg(test)]
mod tests {
    use fishery::{actors::Role, errors::WorkflowError, registrations::RegistrationStatus};
    use fishery_app::domain::registrations::MockRegistrationsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{make_registration, registrations_service};

    use super::*;

    fn make_service(registrations: MockRegistrationsService) -> Service {
        registrations_service(registrations, Router::with_path("registrations/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_registration_returns_200() -> TestResult {
        let mut registrations = MockRegistrationsService::new();

        registrations
            .expect_get()
            .once()
            .withf(|_, id| id.as_str() == "REN-VES-3-1")
            .return_once(|_, _| {
                let mut registration = make_registration("REN-VES-3-1", RegistrationStatus::Pending);
                registration.renewal_for = Some(RegistrationId::new("VES-3"));

                Ok(registration)
            });

        let body: RegistrationResponse =
            TestClient::get("http://example.com/registrations/REN-VES-3-1")
                .send(&make_service(registrations))
                .await
                .take_json()
                .await?;

        assert_eq!(body.id, "REN-VES-3-1");
        assert_eq!(body.renewal_for.as_deref(), Some("VES-3"));
        assert_eq!(body.registration_date, "2026-03-02");
        assert_eq!(body.history.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_registration_returns_404() -> TestResult {
        let mut registrations = MockRegistrationsService::new();

        registrations
            .expect_get()
            .once()
            .return_once(|_, id| Err(WorkflowError::not_found("registrations", id.as_str()).into()));

        let res = TestClient::get("http://example.com/registrations/VES-404")
            .send(&make_service(registrations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_foreign_registration_returns_403() -> TestResult {
        let mut registrations = MockRegistrationsService::new();

        registrations.expect_get().once().return_once(|_, _| {
            Err(WorkflowError::Forbidden {
                role: Role::Fisherfolk,
                action: "view a registration",
            }
            .into())
        });

        let res = TestClient::get("http://example.com/registrations/VES-2")
            .send(&make_service(registrations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
