//! App Router

use salvo::Router;

use crate::{auth, licenses, notifications, payments, registrations, verifications};

/// Every authenticated route.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("registrations")
                .get(registrations::index::handler)
                .post(registrations::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(registrations::get::handler)
                        .put(registrations::update::handler)
                        .push(Router::with_path("review").post(registrations::review::handler))
                        .push(Router::with_path("renewals").post(registrations::renew::handler))
                        .push(Router::with_path("expire").post(registrations::expire::handler)),
                ),
        )
        .push(
            Router::with_path("payments")
                .get(payments::index::handler)
                .post(payments::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(payments::get::handler)
                        .push(Router::with_path("receipt").put(payments::receipt::handler))
                        .push(Router::with_path("certify").post(payments::certify::handler))
                        .push(Router::with_path("verify").post(payments::verify::handler))
                        .push(Router::with_path("reject").post(payments::reject::handler))
                        .push(Router::with_path("reopen").post(payments::reopen::handler)),
                ),
        )
        .push(
            Router::with_path("licenses")
                .get(licenses::index::handler)
                .post(licenses::create::handler)
                .push(Router::with_path("eligible").get(licenses::eligible::handler))
                .push(
                    Router::with_path("{id}")
                        .get(licenses::get::handler)
                        .push(Router::with_path("revoke").post(licenses::revoke::handler)),
                ),
        )
        .push(
            Router::with_path("verifications")
                .get(verifications::index::handler)
                .post(verifications::create::handler)
                .push(
                    Router::with_path("{owner}")
                        .get(verifications::get::handler)
                        .push(Router::with_path("{flag}").put(verifications::flag::handler)),
                ),
        )
        .push(
            Router::with_path("notifications")
                .get(notifications::index::handler)
                .push(Router::with_path("{id}/read").post(notifications::read::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        Service,
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        test::TestClient,
    };
    use testresult::TestResult;

    use fishery_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::state_with_auth;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_every_route_requires_a_bearer_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let service = make_service(auth);

        for path in [
            "registrations",
            "registrations/VES-1",
            "payments/TXN-1",
            "licenses/eligible",
            "verifications/owner-1",
            "notifications",
        ] {
            let res = TestClient::get(format!("http://example.com/{path}"))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected_before_routing() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/payments/TXN-1/verify")
            .add_header(AUTHORIZATION, "Bearer stale", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
