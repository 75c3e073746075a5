//! Profiles
//!
//! A profile assigns a portal role and display name to an identity provider user. Users
//! without one are treated as fisherfolk.

use fishery::{actors::Role, ids::UserId};
use serde::{Deserialize, Serialize};

/// Profile document, keyed by user ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
}
