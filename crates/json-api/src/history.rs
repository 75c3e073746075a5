//! History entries, as rendered in responses.

use fishery::history::HistoryEntry;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HistoryEntryResponse {
    /// What happened, e.g. "Approved"
    pub action: String,

    /// When it happened
    pub date: String,

    /// Display name of the actor
    pub actor: String,

    /// User ID of the actor
    pub actor_id: String,

    /// Reviewer remarks, if any
    pub remarks: Option<String>,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(entry: HistoryEntry) -> Self {
        HistoryEntryResponse {
            action: entry.action,
            date: entry.date.to_string(),
            actor: entry.actor,
            actor_id: entry.actor_id.into_string(),
            remarks: entry.remarks,
        }
    }
}
