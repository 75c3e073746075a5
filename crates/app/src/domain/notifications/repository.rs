//! Notifications Repository

use fishery::{
    ids::{NotificationId, UserId},
    notifications::Notification,
};
use serde_json::json;

use crate::store::{
    Collection, Filter, StoreError, StoreTransaction, create_as, require_as, scan_as,
};

const COLLECTION: Collection = Collection::Notifications;

#[derive(Debug, Clone, Default)]
pub(crate) struct NotificationsRepository;

impl NotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get(
        &self,
        tx: &mut dyn StoreTransaction,
        id: &NotificationId,
    ) -> Result<Notification, StoreError> {
        require_as(tx, COLLECTION, id.as_str()).await
    }

    pub(crate) async fn for_recipient(
        &self,
        tx: &mut dyn StoreTransaction,
        recipient: &UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, StoreError> {
        let filter = Filter::all()
            .eq("recipientId", recipient.as_str())
            .eq_opt("read", unread_only.then_some(false));

        scan_as(tx, COLLECTION, &filter).await
    }

    pub(crate) async fn create(
        &self,
        tx: &mut dyn StoreTransaction,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        create_as(tx, COLLECTION, notification.id.as_str(), notification).await
    }

    pub(crate) async fn mark_read(
        &self,
        tx: &mut dyn StoreTransaction,
        id: &NotificationId,
    ) -> Result<(), StoreError> {
        tx.update(COLLECTION, id.as_str(), json!({ "read": true })).await
    }
}
