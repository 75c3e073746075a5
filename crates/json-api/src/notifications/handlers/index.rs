//! Notification Index Handler

use std::sync::Arc;

use fishery_app::domain::notifications::data::NotificationsQuery;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error, extensions::*, notifications::models::NotificationsResponse,
    state::State,
};

/// Notification Index Handler
///
/// Only ever returns the caller's own notifications.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's notifications"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    unread_only: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let query = NotificationsQuery {
        unread_only: unread_only.into_inner().unwrap_or_default(),
    };

    let notifications = state
        .app
        .notifications
        .list(actor, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}
