//! Payment Index Handler

use std::sync::Arc;

use fishery::ids::{RegistrationId, UserId};
use fishery_app::domain::payments::data::PaymentsQuery;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    payments::models::{PaymentStatusParam, PaymentsResponse},
    state::State,
};

/// Payment Index Handler
///
/// The MTO queue is `?status=pending`, the MAO queue `?status=for_verification`.
#[endpoint(
    tags("payments"),
    summary = "List Payments",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching payments"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    payer: QueryParam<String, false>,
    registration: QueryParam<String, false>,
    status: QueryParam<PaymentStatusParam, false>,
    depot: &mut Depot,
) -> Result<Json<PaymentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let query = PaymentsQuery {
        payer: payer.into_inner().map(UserId::new),
        registration: registration.into_inner().map(RegistrationId::new),
        status: status.into_inner().map(Into::into),
    };

    let payments = state
        .app
        .payments
        .list(actor, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(payments.into()))
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
    async fn test_index_filters_verification_queue() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_list()
            .once()
            .withf(|_, query| {
                *query
                    == PaymentsQuery {
                        status: Some(PaymentStatus::ForVerification),
                        ..PaymentsQuery::default()
                    }
            })
            .return_once(|_, _| Ok(vec![make_payment("TXN-1", PaymentStatus::ForVerification)]));

        let service = payments_service(payments, Router::with_path("payments").get(handler));

        let response: PaymentsResponse =
            TestClient::get("http://example.com/payments?status=for_verification")
                .send(&service)
                .await
                .take_json()
                .await?;

        let statuses: Vec<&str> = response
            .payments
            .iter()
            .map(|payment| payment.status.as_str())
            .collect();

        assert_eq!(statuses, ["For Verification"]);

        Ok(())
    }
}
