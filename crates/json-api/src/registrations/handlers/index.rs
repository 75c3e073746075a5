//! Registration Index Handler

use std::sync::Arc;

use fishery::ids::UserId;
use fishery_app::domain::registrations::data::RegistrationsQuery;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    registrations::models::{RegistrationStatusParam, RegistrationTypeParam, RegistrationsResponse},
    state::State,
};

/// Registration Index Handler
///
/// Fisherfolk only ever see their own registrations, whatever the `owner` filter says.
#[endpoint(
    tags("registrations"),
    summary = "List Registrations",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching registrations"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: QueryParam<String, false>,
    status: QueryParam<RegistrationStatusParam, false>,
    kind: QueryParam<RegistrationTypeParam, false>,
    depot: &mut Depot,
) -> Result<Json<RegistrationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let query = RegistrationsQuery {
        owner: owner.into_inner().map(UserId::new),
        status: status.into_inner().map(Into::into),
        kind: kind.into_inner().map(Into::into),
    };

    let registrations = state
        .app
        .registrations
        .list(actor, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(registrations.into()))
}
