//! Eligible Registrations Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::into_status_error, extensions::*, registrations::models::RegistrationsResponse,
    state::State,
};

/// Eligible Registrations Handler
///
/// Approved registrations with a paid payment and no license yet.
#[endpoint(
    tags("licenses"),
    summary = "List Registrations Eligible For A License",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Eligible registrations"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO issues licenses"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RegistrationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let eligible = state
        .app
        .licenses
        .eligible(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(eligible.into()))
}
