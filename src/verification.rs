//! `BoatR` / `FishR` verification
//!
//! One submission per owner, keyed by owner ID. The submission is the authoritative
//! record; the boolean flags on registrations are a projection of it and are rewritten
//! whenever a flag changes.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    actors::{Actor, Role},
    errors::WorkflowError,
    history::HistoryEntry,
    ids::UserId,
    registrations::VerificationFlags,
};

/// Per-registry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlagStatus {
    /// Awaiting review.
    #[default]
    Pending,

    /// Verified by the registry.
    Approved,

    /// Refused by the registry.
    Rejected,
}

impl FlagStatus {
    /// Stable name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl Display for FlagStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// National registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Registry {
    /// Fisherfolk registry.
    FishR,

    /// Boat registry.
    BoatR,
}

impl Registry {
    /// Lowercase name used in URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FishR => "fishr",
            Self::BoatR => "boatr",
        }
    }
}

impl Display for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Verification submission document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSubmission {
    /// Owner ID; also the document ID.
    pub owner_id: UserId,

    /// Owner's display name.
    pub owner_name: String,

    /// `FishR` registry status.
    #[serde(rename = "fishRStatus")]
    pub fishr_status: FlagStatus,

    /// `BoatR` registry status.
    #[serde(rename = "boatRStatus")]
    pub boatr_status: FlagStatus,

    /// Moment the owner first submitted.
    pub submitted_at: Timestamp,

    /// Audit trail, oldest first.
    pub history: Vec<HistoryEntry>,
}

impl VerificationSubmission {
    /// Open a submission with both registries pending.
    ///
    /// # Errors
    ///
    /// Only fisherfolk open their own submission.
    pub fn open(actor: &Actor, now: Timestamp) -> Result<Self, WorkflowError> {
        actor.require(&[Role::Fisherfolk], "request verification")?;

        Ok(Self {
            owner_id: actor.user_id.clone(),
            owner_name: actor.name.clone(),
            fishr_status: FlagStatus::Pending,
            boatr_status: FlagStatus::Pending,
            submitted_at: now,
            history: vec![HistoryEntry::new("Submitted", actor, now)],
        })
    }

    /// Record an admin decision for one registry.
    ///
    /// # Errors
    ///
    /// Only the MAO may set flags.
    pub fn set_flag(
        &mut self,
        registry: Registry,
        status: FlagStatus,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<(), WorkflowError> {
        actor.require(&[Role::Mao], "set a verification flag")?;

        match registry {
            Registry::FishR => self.fishr_status = status,
            Registry::BoatR => self.boatr_status = status,
        }

        self.history.push(HistoryEntry::new(
            format!("{registry} {status}"),
            actor,
            now,
        ));

        Ok(())
    }

    /// Derived status; never persisted.
    #[must_use]
    pub fn overall_status(&self) -> FlagStatus {
        overall_status(self.fishr_status, self.boatr_status)
    }

    /// Boolean projection written onto the owner's registrations.
    #[must_use]
    pub fn flags(&self) -> VerificationFlags {
        VerificationFlags {
            boatr: self.boatr_status == FlagStatus::Approved,
            fishr: self.fishr_status == FlagStatus::Approved,
        }
    }
}

/// Rejected if either is rejected, approved if both are approved, otherwise pending.
#[must_use]
pub fn overall_status(fishr: FlagStatus, boatr: FlagStatus) -> FlagStatus {
    match (fishr, boatr) {
        (FlagStatus::Rejected, _) | (_, FlagStatus::Rejected) => FlagStatus::Rejected,
        (FlagStatus::Approved, FlagStatus::Approved) => FlagStatus::Approved,
        _ => FlagStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn owner() -> Actor {
        Actor {
            user_id: UserId::new("owner"),
            name: "Pedro".to_string(),
            email: "pedro@example.com".to_string(),
            role: Role::Fisherfolk,
        }
    }

    fn mao() -> Actor {
        Actor {
            user_id: UserId::new("mao"),
            name: "MAO".to_string(),
            email: "mao@example.com".to_string(),
            role: Role::Mao,
        }
    }

    #[test]
    fn overall_status_table() {
        use FlagStatus::{Approved, Pending, Rejected};

        assert_eq!(overall_status(Approved, Approved), Approved);
        assert_eq!(overall_status(Approved, Pending), Pending);
        assert_eq!(overall_status(Pending, Pending), Pending);
        assert_eq!(overall_status(Approved, Rejected), Rejected);
        assert_eq!(overall_status(Rejected, Pending), Rejected);
    }

    #[test]
    fn flags_project_approval_only() -> TestResult {
        let mut submission = VerificationSubmission::open(&owner(), Timestamp::UNIX_EPOCH)?;

        submission.set_flag(Registry::BoatR, FlagStatus::Approved, &mao(), Timestamp::UNIX_EPOCH)?;
        submission.set_flag(Registry::FishR, FlagStatus::Rejected, &mao(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(
            submission.flags(),
            VerificationFlags {
                boatr: true,
                fishr: false
            }
        );
        assert_eq!(submission.overall_status(), FlagStatus::Rejected);
        assert_eq!(submission.history.len(), 3);

        Ok(())
    }

    #[test]
    fn owner_cannot_set_own_flag() -> TestResult {
        let mut submission = VerificationSubmission::open(&owner(), Timestamp::UNIX_EPOCH)?;

        let result = submission.set_flag(
            Registry::FishR,
            FlagStatus::Approved,
            &owner(),
            Timestamp::UNIX_EPOCH,
        );

        assert!(matches!(result, Err(WorkflowError::Forbidden { .. })));
        assert_eq!(submission.fishr_status, FlagStatus::Pending);

        Ok(())
    }

    #[test]
    fn document_uses_registry_field_names() -> TestResult {
        let submission = VerificationSubmission::open(&owner(), Timestamp::UNIX_EPOCH)?;
        let value = serde_json::to_value(&submission)?;

        assert_eq!(value.get("ownerId"), Some(&serde_json::json!("owner")));
        assert_eq!(value.get("fishRStatus"), Some(&serde_json::json!("Pending")));
        assert_eq!(value.get("boatRStatus"), Some(&serde_json::json!("Pending")));

        Ok(())
    }
}
