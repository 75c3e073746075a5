//! Actors
//!
//! The people (and the scheduler) that move records through the workflow.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{errors::WorkflowError, ids::UserId};

/// Portal role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Registers vessels and gear, pays fees.
    Fisherfolk,

    /// Municipal agriculture office: reviews, verifies payments, issues licenses.
    Mao,

    /// Municipal treasury office: certifies OR numbers.
    Mto,

    /// Field inspector: reviews registrations and flags expiries.
    Inspector,

    /// Scheduled or operator-triggered jobs.
    System,
}

impl Role {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fisherfolk => "fisherfolk",
            Self::Mao => "mao",
            Self::Mto => "mto",
            Self::Inspector => "inspector",
            Self::System => "system",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Roles allowed to review registrations.
pub const REVIEWERS: &[Role] = &[Role::Mao, Role::Inspector];

/// Roles allowed to run the expiry sweep.
pub const SWEEPERS: &[Role] = &[Role::Mao, Role::System];

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity provider user ID.
    pub user_id: UserId,

    /// Display name recorded in history entries.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Portal role.
    pub role: Role,
}

impl Actor {
    /// The actor used for scheduled sweeps.
    #[must_use]
    pub fn system() -> Self {
        Self {
            user_id: UserId::new("system"),
            name: "System".to_string(),
            email: String::new(),
            role: Role::System,
        }
    }

    /// Fail with [`WorkflowError::Forbidden`] unless the actor holds one of `roles`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Forbidden`] when the role is not permitted.
    pub fn require(&self, roles: &[Role], action: &'static str) -> Result<(), WorkflowError> {
        if roles.contains(&self.role) {
            return Ok(());
        }

        Err(WorkflowError::Forbidden {
            role: self.role,
            action,
        })
    }

    /// Fail unless the actor is a fisherfolk acting on their own record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Forbidden`] for any other actor.
    pub fn require_owner(&self, owner: &UserId, action: &'static str) -> Result<(), WorkflowError> {
        self.require(&[Role::Fisherfolk], action)?;

        if &self.user_id != owner {
            return Err(WorkflowError::Forbidden {
                role: self.role,
                action,
            });
        }

        Ok(())
    }

    /// Whether the actor may read records owned by `owner`.
    #[must_use]
    pub fn can_view(&self, owner: &UserId) -> bool {
        self.role != Role::Fisherfolk || &self.user_id == owner
    }

    /// Fail unless the actor may read records owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Forbidden`] for fisherfolk reading someone else's record.
    pub fn require_viewer(&self, owner: &UserId, action: &'static str) -> Result<(), WorkflowError> {
        if self.can_view(owner) {
            return Ok(());
        }

        Err(WorkflowError::Forbidden {
            role: self.role,
            action,
        })
    }
}
