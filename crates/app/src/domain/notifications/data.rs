//! Notification queries.

/// Optional constraints on a notification listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationsQuery {
    /// Only notifications not yet marked read.
    pub unread_only: bool,
}
