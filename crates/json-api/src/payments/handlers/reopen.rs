//! Reopen Payment Handler

use std::sync::Arc;

use fishery::ids::PaymentId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, observability::record_transition,
    payments::models::PaymentResponse, state::State,
};

/// Reopen Payment Handler
///
/// Sends a Paid or Failed payment back to Pending, clearing the treasury certification.
#[endpoint(
    tags("payments"),
    summary = "Reopen Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment reopened"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO reopens"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment is not settled"),
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
        .reopen(actor, PaymentId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    record_transition("payment", "reopen");

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use fishery::payments::PaymentStatus;
    use fishery_app::domain::payments::MockPaymentsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{make_payment, payments_service};

    use super::*;

    #[tokio::test]
    async fn test_reopen_returns_pending_payment() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_reopen()
            .once()
            .withf(|_, id| id.as_str() == "TXN-1")
            .return_once(|_, _| Ok(make_payment("TXN-1", PaymentStatus::Pending)));

        let service =
            payments_service(payments, Router::with_path("payments/{id}/reopen").post(handler));

        let body: PaymentResponse = TestClient::post("http://example.com/payments/TXN-1/reopen")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.status, "Pending");
        assert!(!body.mto_verified);

        Ok(())
    }
}
