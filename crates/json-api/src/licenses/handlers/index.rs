//! License Index Handler

use std::sync::Arc;

use fishery::ids::{RegistrationId, UserId};
use fishery_app::domain::licenses::data::LicensesQuery;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    licenses::models::{LicenseStatusParam, LicensesResponse},
    state::State,
};

/// License Index Handler
#[endpoint(
    tags("licenses"),
    summary = "List Licenses",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching licenses"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: QueryParam<String, false>,
    registration: QueryParam<String, false>,
    status: QueryParam<LicenseStatusParam, false>,
    depot: &mut Depot,
) -> Result<Json<LicensesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let query = LicensesQuery {
        owner: owner.into_inner().map(UserId::new),
        registration: registration.into_inner().map(RegistrationId::new),
        status: status.into_inner().map(Into::into),
    };

    let licenses = state
        .app
        .licenses
        .list(actor, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(licenses.into()))
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
    async fn test_index_filters_by_registration() -> TestResult {
        let mut licenses = MockLicensesService::new();

        licenses
            .expect_list()
            .once()
            .withf(|_, query| {
                *query
                    == LicensesQuery {
                        registration: Some(RegistrationId::new("VES-1")),
                        status: Some(LicenseStatus::Active),
                        ..LicensesQuery::default()
                    }
            })
            .return_once(|_, _| Ok(vec![make_license("LIC-VESSEL-TXN-1", LicenseStatus::Active)]));

        let service = licenses_service(licenses, Router::with_path("licenses").get(handler));

        let response: LicensesResponse =
            TestClient::get("http://example.com/licenses?registration=VES-1&status=active")
                .send(&service)
                .await
                .take_json()
                .await?;

        let ids: Vec<&str> = response
            .licenses
            .iter()
            .map(|license| license.id.as_str())
            .collect();

        assert_eq!(ids, ["LIC-VESSEL-TXN-1"]);

        Ok(())
    }
}
