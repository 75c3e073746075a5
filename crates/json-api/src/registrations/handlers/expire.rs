//! Expire Registration Handler

use std::sync::Arc;

use fishery::ids::RegistrationId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, observability::record_transition,
    registrations::models::RegistrationResponse, state::State,
};

/// Expire Registration Handler
#[endpoint(
    tags("registrations"),
    summary = "Mark Registration Expired",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Registration expired"),
        (status_code = StatusCode::FORBIDDEN, description = "Only MAO staff and inspectors expire registrations"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::CONFLICT, description = "Registration is not approved"),
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
        .mark_expired(actor, RegistrationId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    record_transition("registration", "expire");

    Ok(Json(registration.into()))
}
