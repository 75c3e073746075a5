//! Create Registration Handler

use std::sync::Arc;

use fishery::registrations::RegistrationDetails;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::into_status_error,
    extensions::*,
    observability::record_transition,
    registrations::models::{RegistrationResponse, RegistrationTypeParam},
    state::State,
};

/// Create Registration Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateRegistrationRequest {
    /// Vessel or gear
    #[serde(rename = "type")]
    pub kind: RegistrationTypeParam,

    /// Vessel or gear details as `key: value` text
    pub details: String,

    #[serde(default)]
    pub profile: String,

    #[serde(default)]
    pub contact: String,

    #[serde(default)]
    pub address: String,

    /// Stored photo URLs
    #[serde(default)]
    pub photos: Vec<String>,
}

impl From<CreateRegistrationRequest> for RegistrationDetails {
    fn from(request: CreateRegistrationRequest) -> Self {
        RegistrationDetails {
            details: request.details,
            profile: request.profile,
            contact: request.contact,
            address: request.address,
            photos: request.photos,
        }
    }
}

/// Create Registration Handler
///
/// The caller must be verified by both `FishR` and `BoatR`, and may only hold one pending
/// registration per type.
#[endpoint(
    tags("registrations"),
    summary = "Submit Registration",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Registration submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Owner not verified or invalid payload"),
        (status_code = StatusCode::FORBIDDEN, description = "Only fisherfolk submit registrations"),
        (status_code = StatusCode::CONFLICT, description = "A pending registration of this type exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRegistrationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();

    let registration = state
        .app
        .registrations
        .submit(actor, request.kind.into(), request.into())
        .await
        .map_err(into_status_error)?;

    record_transition("registration", "submit");

    res.add_header(LOCATION, format!("/registrations/{}", registration.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(registration.into()))
}
