//! Append-only audit history carried on registrations and payments.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{actors::Actor, ids::UserId};

/// A single, write-once history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Human-readable action label, e.g. `Submitted`.
    pub action: String,

    /// When the action was recorded.
    pub date: Timestamp,

    /// Display name of the actor.
    pub actor: String,

    /// ID of the actor.
    pub actor_id: UserId,

    /// Free-text remarks supplied with the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl HistoryEntry {
    /// Record `action` by `actor` at `date`.
    pub fn new(action: impl Into<String>, actor: &Actor, date: Timestamp) -> Self {
        Self {
            action: action.into(),
            date,
            actor: actor.name.clone(),
            actor_id: actor.user_id.clone(),
            remarks: None,
        }
    }

    /// Attach remarks, dropping blank ones.
    #[must_use]
    pub fn with_remarks(mut self, remarks: Option<String>) -> Self {
        self.remarks = remarks.filter(|remarks| !remarks.trim().is_empty());
        self
    }
}
