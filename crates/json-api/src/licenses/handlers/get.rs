//! Get License Handler

use std::sync::Arc;

use fishery::ids::LicenseId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, licenses::models::LicenseResponse, state::State,
};

/// Get License Handler
#[endpoint(
    tags("licenses"),
    summary = "Get License",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "License found"),
        (status_code = StatusCode::FORBIDDEN, description = "License belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "License not found"),
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
        .get(actor, LicenseId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(license.into()))
}

#[cfg(test)]
mod tests {
    use fishery::licenses::LicenseStatus;
    use fishery_app::domain::licenses::MockLicensesService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{licenses_service, make_license};

    use super::*;

    #[tokio::test]
    async fn test_get_license_returns_200() -> TestResult {
        let mut licenses = MockLicensesService::new();

        licenses
            .expect_get()
            .once()
            .withf(|_, id| id.as_str() == "LIC-VESSEL-TXN-1")
            .return_once(|_, _| Ok(make_license("LIC-VESSEL-TXN-1", LicenseStatus::Active)));

        let service = licenses_service(licenses, Router::with_path("licenses/{id}").get(handler));

        let body: LicenseResponse = TestClient::get("http://example.com/licenses/LIC-VESSEL-TXN-1")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.payment_id, "TXN-1");
        assert_eq!(body.status, "Active");
        assert_eq!(body.issued_by, "MAO Officer");

        Ok(())
    }
}
