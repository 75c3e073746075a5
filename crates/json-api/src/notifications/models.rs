//! Notification response models

use fishery::notifications::Notification;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: String,
    pub read: bool,

    /// Payment the notification is about
    pub payment_id: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        NotificationResponse {
            id: notification.id.into_string(),
            title: notification.title,
            message: notification.message,
            created_at: notification.created_at.to_string(),
            read: notification.read,
            payment_id: notification.payment_id.map(String::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    /// Newest first
    pub notifications: Vec<NotificationResponse>,
}
