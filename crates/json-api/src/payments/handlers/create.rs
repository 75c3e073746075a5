//! Create Payment Handler

use std::sync::Arc;

use fishery::{ids::RegistrationId, payments::NewPayment};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::into_status_error, extensions::*, observability::record_transition,
    payments::models::PaymentResponse, state::State,
};

/// Create Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentRequest {
    /// Approved registration being paid for
    pub registration_id: String,

    /// Assessed fee in centavos
    pub amount: u64,

    /// e.g. "Over the counter"
    pub payment_method: String,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(request: CreatePaymentRequest) -> Self {
        NewPayment {
            registration_id: RegistrationId::new(request.registration_id),
            amount: request.amount,
            payment_method: request.payment_method,
        }
    }
}

/// Create Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Create Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payment created"),
        (status_code = StatusCode::FORBIDDEN, description = "Registration belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::CONFLICT, description = "Registration not approved or already has a payment"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payment = state
        .app
        .payments
        .create(actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_transition("payment", "create");

    res.add_header(LOCATION, format!("/payments/{}", payment.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use fishery::payments::PaymentStatus;
    use fishery_app::domain::{ServiceError, payments::MockPaymentsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{make_payment, payments_service, test_actor};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        payments_service(payments, Router::with_path("payments").post(handler))
    }

    #[tokio::test]
    async fn test_create_payment_success() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_create()
            .once()
            .withf(|actor, request| {
                *actor == test_actor()
                    && *request
                        == NewPayment {
                            registration_id: RegistrationId::new("VES-1"),
                            amount: 150_000,
                            payment_method: "Over the counter".to_string(),
                        }
            })
            .return_once(|_, _| Ok(make_payment("TXN-1", PaymentStatus::Pending)));

        let mut res = TestClient::post("http://example.com/payments")
            .json(&json!({
                "registration_id": "VES-1",
                "amount": 150_000,
                "payment_method": "Over the counter",
            }))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/payments/TXN-1"));
        assert_eq!(body.status, "Pending");
        assert!(!body.mto_verified);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_payment_returns_409() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_create().once().return_once(|_, _| {
            Err(ServiceError::AlreadyExists {
                collection: "payments",
                id: "VES-1".to_string(),
            })
        });

        let res = TestClient::post("http://example.com/payments")
            .json(&json!({
                "registration_id": "VES-1",
                "amount": 150_000,
                "payment_method": "Over the counter",
            }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
