//! Issue License Handler

use std::sync::Arc;

use fishery::ids::RegistrationId;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::into_status_error, extensions::*, licenses::models::LicenseResponse,
    observability::record_transition, state::State,
};

/// Issue License Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssueLicenseRequest {
    /// Eligible registration to license
    pub registration_id: String,
}

/// Issue License Handler
///
/// At most one license is ever issued per registration.
#[endpoint(
    tags("licenses"),
    summary = "Issue License",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "License issued"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO issues licenses"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration or paid payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Registration not approved or already licensed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<IssueLicenseRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<LicenseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let license = state
        .app
        .licenses
        .issue(actor, RegistrationId::new(json.into_inner().registration_id))
        .await
        .map_err(into_status_error)?;

    record_transition("license", "issue");

    res.add_header(LOCATION, format!("/licenses/{}", license.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(license.into()))
}
