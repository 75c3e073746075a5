//! Renew Registration Handler

use std::sync::Arc;

use fishery::ids::RegistrationId;
use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    errors::into_status_error,
    extensions::*,
    observability::record_transition,
    registrations::models::{RegistrationResponse, RegistrationUpdateRequest},
    state::State,
};

/// Renew Registration Handler
///
/// Creates a new pending registration cloned from an approved or expired one. The
/// source registration is left untouched.
#[endpoint(
    tags("registrations"),
    summary = "Renew Registration",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Renewal submitted"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::CONFLICT, description = "Registration cannot be renewed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<RegistrationUpdateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let renewal = state
        .app
        .registrations
        .renew(
            actor,
            RegistrationId::new(id.into_inner()),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    record_transition("registration", "renew");

    res.add_header(LOCATION, format!("/registrations/{}", renewal.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(renewal.into()))
}
