//! Reject Payment Handler

use std::sync::Arc;

use fishery::ids::PaymentId;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::into_status_error,
    extensions::*,
    observability::record_transition,
    payments::models::{PaymentResponse, RejectionReasonParam},
    state::State,
};

/// Reject Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectRequest {
    /// Reason shown to the payer
    pub reason: RejectionReasonParam,
}

/// Reject Payment Handler
///
/// Marks the payment Failed and notifies the payer with the chosen reason.
#[endpoint(
    tags("payments"),
    summary = "Reject Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment rejected"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO rejects"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment is not awaiting verification"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<RejectRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payment = state
        .app
        .payments
        .reject(
            actor,
            PaymentId::new(id.into_inner()),
            json.into_inner().reason.into(),
        )
        .await
        .map_err(into_status_error)?;

    record_transition("payment", "reject");

    Ok(Json(payment.into()))
}
