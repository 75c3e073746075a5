//! Upload Receipt Handler

use std::sync::Arc;

use fishery::{ids::PaymentId, payments::ReceiptUpload};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::into_status_error, extensions::*, observability::record_transition,
    payments::models::PaymentResponse, state::State,
};

/// Upload Receipt Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptRequest {
    /// Stored receipt image URL
    pub receipt_url: String,

    /// OR number printed on the receipt
    pub or_number: String,
}

impl From<ReceiptRequest> for ReceiptUpload {
    fn from(request: ReceiptRequest) -> Self {
        ReceiptUpload {
            receipt_url: request.receipt_url,
            or_number: request.or_number,
        }
    }
}

/// Upload Receipt Handler
///
/// May be repeated while the payment is pending or awaiting verification.
#[endpoint(
    tags("payments"),
    summary = "Upload Receipt",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Receipt attached"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing OR number"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the payer"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment already settled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<ReceiptRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payment = state
        .app
        .payments
        .upload_receipt(actor, PaymentId::new(id.into_inner()), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_transition("payment", "upload_receipt");

    Ok(Json(payment.into()))
}
