//! Revoke License Handler

use std::sync::Arc;

use fishery::ids::LicenseId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, licenses::models::LicenseResponse,
    observability::record_transition, state::State,
};

/// Revoke License Handler
#[endpoint(
    tags("licenses"),
    summary = "Revoke License",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "License revoked"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO revokes licenses"),
        (status_code = StatusCode::NOT_FOUND, description = "License not found"),
        (status_code = StatusCode::CONFLICT, description = "License is not active"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<LicenseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let license = state
        .app
        .licenses
        .revoke(actor, LicenseId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    record_transition("license", "revoke");

    Ok(Json(license.into()))
}

#[cfg(test)]
mod tests {
    use fishery::{errors::WorkflowError, licenses::LicenseStatus};
    use fishery_app::domain::licenses::MockLicensesService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{licenses_service, make_license};

    use super::*;

    fn make_service(licenses: MockLicensesService) -> Service {
        licenses_service(licenses, Router::with_path("licenses/{id}/revoke").post(handler))
    }

    #[tokio::test]
    async fn test_revoke_returns_revoked_license() -> TestResult {
        let mut licenses = MockLicensesService::new();

        licenses
            .expect_revoke()
            .once()
            .withf(|_, id| id.as_str() == "LIC-GEAR-TXN-2")
            .return_once(|_, _| Ok(make_license("LIC-GEAR-TXN-2", LicenseStatus::Revoked)));

        let body: LicenseResponse =
            TestClient::post("http://example.com/licenses/LIC-GEAR-TXN-2/revoke")
                .send(&make_service(licenses))
                .await
                .take_json()
                .await?;

        assert_eq!(body.status, "Revoked");

        Ok(())
    }

    #[tokio::test]
    async fn test_revoke_twice_returns_409() -> TestResult {
        let mut licenses = MockLicensesService::new();

        licenses.expect_revoke().once().return_once(|_, _| {
            Err(WorkflowError::InvalidTransition {
                entity: "license",
                from: "Revoked",
                action: "revoke",
            }
            .into())
        });

        let res = TestClient::post("http://example.com/licenses/LIC-GEAR-TXN-2/revoke")
            .send(&make_service(licenses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
