//! Verification Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::into_status_error, extensions::*, state::State,
    verifications::models::VerificationsResponse,
};

/// Verification Index Handler
#[endpoint(
    tags("verifications"),
    summary = "List Verification Submissions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Every submission"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VerificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let views = state
        .app
        .verification
        .list(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(VerificationsResponse {
        verifications: views.into_iter().map(Into::into).collect(),
    }))
}
