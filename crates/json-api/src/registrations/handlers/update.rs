//! Update Registration Handler

use std::sync::Arc;

use fishery::ids::RegistrationId;
use salvo::{
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

/// Update Registration Handler
///
/// Only the owner may edit, and only while the registration is still pending.
#[endpoint(
    tags("registrations"),
    summary = "Update Registration",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Registration updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::CONFLICT, description = "Registration is no longer pending"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<RegistrationUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let registration = state
        .app
        .registrations
        .update_details(
            actor,
            RegistrationId::new(id.into_inner()),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    record_transition("registration", "update");

    Ok(Json(registration.into()))
}
