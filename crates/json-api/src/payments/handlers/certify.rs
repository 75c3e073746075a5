//! Treasury Certification Handler

use std::sync::Arc;

use fishery::{ids::PaymentId, payments::TreasurySubmission};
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

/// Treasury Certification Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CertifyRequest {
    /// Official receipt number from the treasury's books
    pub or_number: String,

    /// Treasury confirms the payment was received
    pub certified: bool,
}

impl From<CertifyRequest> for TreasurySubmission {
    fn from(request: CertifyRequest) -> Self {
        TreasurySubmission {
            or_number: request.or_number,
            certified: request.certified,
        }
    }
}

/// Treasury Certification Handler
///
/// Records the OR number and moves the payment to For Verification.
#[endpoint(
    tags("payments"),
    summary = "Certify Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment forwarded for verification"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing OR number or certification"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the treasury certifies"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment is not pending"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<CertifyRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payment = state
        .app
        .payments
        .treasury_submit(actor, PaymentId::new(id.into_inner()), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_transition("payment", "certify");

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use fishery::{
        errors::{ValidationError, WorkflowError},
        payments::{MtoVerifiedStatus, PaymentStatus},
    };
    use fishery_app::domain::payments::MockPaymentsService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{make_payment, payments_service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        payments_service(payments, Router::with_path("payments/{id}/certify").post(handler))
    }

    #[tokio::test]
    async fn test_certify_moves_to_verification() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_treasury_submit()
            .once()
            .withf(|_, id, submission| {
                id.as_str() == "TXN-1"
                    && *submission
                        == TreasurySubmission {
                            or_number: "OR-0001".to_string(),
                            certified: true,
                        }
            })
            .return_once(|_, _, _| {
                let mut payment = make_payment("TXN-1", PaymentStatus::ForVerification);
                payment.reference_number = Some("OR-0001".to_string());
                payment.mto_verified_status = MtoVerifiedStatus::Verified;

                Ok(payment)
            });

        let mut res = TestClient::post("http://example.com/payments/TXN-1/certify")
            .json(&json!({ "or_number": "OR-0001", "certified": true }))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "For Verification");
        assert_eq!(body.reference_number.as_deref(), Some("OR-0001"));
        assert!(body.mto_verified);

        Ok(())
    }

    #[tokio::test]
    async fn test_uncertified_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_treasury_submit().once().return_once(|_, _, _| {
            Err(WorkflowError::from(ValidationError::NotCertified).into())
        });

        let res = TestClient::post("http://example.com/payments/TXN-1/certify")
            .json(&json!({ "or_number": "OR-0001", "certified": false }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
