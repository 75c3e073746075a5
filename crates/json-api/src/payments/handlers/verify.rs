//! Verify Payment Handler

use std::sync::Arc;

use fishery::ids::PaymentId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, observability::record_transition,
    payments::models::PaymentResponse, state::State,
};

/// Verify Payment Handler
///
/// Marks the payment Paid and notifies the payer.
#[endpoint(
    tags("payments"),
    summary = "Verify Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Treasury certification or payer evidence missing"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the MAO verifies"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment is not awaiting verification"),
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
        .verify(actor, PaymentId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    record_transition("payment", "verify");

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use fishery::{
        errors::{ValidationError, WorkflowError},
        payments::PaymentStatus,
    };
    use fishery_app::domain::payments::MockPaymentsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{make_payment, payments_service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        payments_service(payments, Router::with_path("payments/{id}/verify").post(handler))
    }

    #[tokio::test]
    async fn test_verify_returns_paid_payment() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_verify()
            .once()
            .withf(|_, id| id.as_str() == "TXN-1")
            .return_once(|_, _| Ok(make_payment("TXN-1", PaymentStatus::Paid)));

        let body: PaymentResponse = TestClient::post("http://example.com/payments/TXN-1/verify")
            .send(&make_service(payments))
            .await
            .take_json()
            .await?;

        assert_eq!(body.status, "Paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_without_treasury_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_verify().once().return_once(|_, _| {
            Err(WorkflowError::from(ValidationError::TreasuryNotVerified).into())
        });

        let res = TestClient::post("http://example.com/payments/TXN-1/verify")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
