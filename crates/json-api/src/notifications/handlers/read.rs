//! Mark Notification Read Handler

use std::sync::Arc;

use fishery::ids::NotificationId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, notifications::models::NotificationResponse,
    state::State,
};

/// Mark Notification Read Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark Notification Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notification marked read"),
        (status_code = StatusCode::FORBIDDEN, description = "Notification belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "Notification not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<NotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let notification = state
        .app
        .notifications
        .mark_read(actor, NotificationId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(notification.into()))
}

#[cfg(test)]
mod tests {
    use fishery::{actors::Role, errors::WorkflowError};
    use fishery_app::domain::notifications::MockNotificationsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{make_notification, notifications_service};

    use super::*;

    fn make_service(notifications: MockNotificationsService) -> Service {
        notifications_service(
            notifications,
            Router::with_path("notifications/{id}/read").post(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_read_returns_read_notification() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_mark_read()
            .once()
            .withf(|_, id| id.as_str() == "n-1")
            .return_once(|_, _| Ok(make_notification("n-1", true)));

        let body: NotificationResponse =
            TestClient::post("http://example.com/notifications/n-1/read")
                .send(&make_service(notifications))
                .await
                .take_json()
                .await?;

        assert!(body.read);
        assert_eq!(body.payment_id.as_deref(), Some("TXN-1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_foreign_notification_returns_403() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications.expect_mark_read().once().return_once(|_, _| {
            Err(WorkflowError::Forbidden {
                role: Role::Mao,
                action: "mark a notification read",
            }
            .into())
        });

        let res = TestClient::post("http://example.com/notifications/n-2/read")
            .send(&make_service(notifications))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
