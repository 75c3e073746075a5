//! Notifications Service

use std::sync::Arc;

use async_trait::async_trait;
use fishery::{
    actors::Actor, errors::WorkflowError, ids::NotificationId, notifications::Notification,
};
use mockall::automock;
use tracing::info;

use crate::{
    domain::{
        errors::ServiceError,
        notifications::{data::NotificationsQuery, repository::NotificationsRepository},
    },
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct StoreNotificationsService {
    store: Arc<dyn DocumentStore>,
    repository: NotificationsRepository,
}

impl StoreNotificationsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            repository: NotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for StoreNotificationsService {
    #[tracing::instrument(
        name = "notifications.service.list",
        skip(self, actor),
        fields(user_id = %actor.user_id, unread_only = query.unread_only),
        err
    )]
    async fn list(
        &self,
        actor: Actor,
        query: NotificationsQuery,
    ) -> Result<Vec<Notification>, ServiceError> {
        let mut tx = self.store.begin().await?;

        let mut notifications = self
            .repository
            .for_recipient(tx.as_mut(), &actor.user_id, query.unread_only)
            .await?;

        tx.commit().await?;

        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(notifications)
    }

    #[tracing::instrument(
        name = "notifications.service.mark_read",
        skip(self, actor),
        fields(user_id = %actor.user_id, notification_id = %id),
        err
    )]
    async fn mark_read(
        &self,
        actor: Actor,
        id: NotificationId,
    ) -> Result<Notification, ServiceError> {
        let mut tx = self.store.begin().await?;

        let mut notification = self.repository.get(tx.as_mut(), &id).await?;

        if notification.recipient_id != actor.user_id {
            return Err(WorkflowError::Forbidden {
                role: actor.role,
                action: "read someone else's notification",
            }
            .into());
        }

        if !notification.read {
            self.repository.mark_read(tx.as_mut(), &id).await?;
            notification.read = true;
        }

        tx.commit().await?;

        info!(notification_id = %id, "marked notification read");

        Ok(notification)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// The caller's notifications, newest first.
    async fn list(
        &self,
        actor: Actor,
        query: NotificationsQuery,
    ) -> Result<Vec<Notification>, ServiceError>;

    /// Mark one of the caller's notifications as read.
    async fn mark_read(
        &self,
        actor: Actor,
        id: NotificationId,
    ) -> Result<Notification, ServiceError>;
}
