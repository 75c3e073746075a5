//! Open Verification Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, observability::record_transition, state::State,
    verifications::models::VerificationResponse,
};

/// Open Verification Handler
///
/// Opens the caller's `FishR`/`BoatR` submission with both registries pending.
#[endpoint(
    tags("verifications"),
    summary = "Open Verification Submission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Submission opened"),
        (status_code = StatusCode::FORBIDDEN, description = "Only fisherfolk open submissions"),
        (status_code = StatusCode::CONFLICT, description = "Submission already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VerificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let view = state
        .app
        .verification
        .open(actor)
        .await
        .map_err(into_status_error)?;

    record_transition("verification", "open");

    res.add_header(
        LOCATION,
        format!("/verifications/{}", view.submission.owner_id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(view.into()))
}
