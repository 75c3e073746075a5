//! Get Payment Handler

use std::sync::Arc;

use fishery::ids::PaymentId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, payments::models::PaymentResponse, state::State,
};

/// Get Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Get Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment found"),
        (status_code = StatusCode::FORBIDDEN, description = "Payment belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payment = state
        .app
        .payments
        .get(actor, PaymentId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(payment.into()))
}
