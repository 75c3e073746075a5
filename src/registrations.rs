//! Registrations
//!
//! A registration is a fisherfolk's vessel or gear entry. Its status only ever moves along
//! these edges:
//!
//! ```text
//! Pending ──review──▶ Approved ──mark_expired──▶ Expired
//!    │
//!    └─────review──▶ Rejected
//! ```
//!
//! Renewing never transitions the source record; it produces a brand new `Pending`
//! registration that points back at its source through `renewal_for`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{Timestamp, ToSpan, civil::Date};
use serde::{Deserialize, Serialize};

use crate::{
    actors::{Actor, REVIEWERS, Role},
    errors::{ValidationError, WorkflowError},
    history::HistoryEntry,
    ids::{RegistrationId, UserId},
};

const ENTITY: &str = "registration";

/// What is being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationType {
    /// A fishing vessel.
    Vessel,

    /// Fishing gear.
    Gear,
}

impl RegistrationType {
    /// Stable name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vessel => "Vessel",
            Self::Gear => "Gear",
        }
    }

    /// Prefix of registration IDs of this type.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Vessel => "VES",
            Self::Gear => "GEAR",
        }
    }

    /// Type segment of license IDs.
    #[must_use]
    pub const fn license_code(self) -> &'static str {
        match self {
            Self::Vessel => "VESSEL",
            Self::Gear => "GEAR",
        }
    }
}

impl Display for RegistrationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Registration status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// Awaiting review.
    #[default]
    Pending,

    /// Approved by the MAO or an inspector.
    Approved,

    /// Rejected on review.
    Rejected,

    /// Lapsed after approval.
    Expired,
}

impl RegistrationStatus {
    /// Stable name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }
}

impl Display for RegistrationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Review outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Pending → Approved
    Approve,

    /// Pending → Rejected
    Reject,
}

/// Owner fields, denormalized onto the registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner user ID.
    #[serde(rename = "ownerId")]
    pub id: UserId,

    /// Owner display name.
    #[serde(rename = "ownerName")]
    pub name: String,

    /// Owner email.
    #[serde(rename = "ownerEmail")]
    pub email: String,

    /// Owner contact number.
    #[serde(rename = "ownerContact", default)]
    pub contact: String,

    /// Owner address.
    #[serde(rename = "ownerAddress", default)]
    pub address: String,
}

/// Registration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Registration ID.
    pub id: RegistrationId,

    /// Owner details.
    #[serde(flatten)]
    pub owner: Owner,

    /// Vessel or gear.
    #[serde(rename = "type")]
    pub kind: RegistrationType,

    /// Vessel or gear details as free `key: value` text.
    pub details: String,

    /// Owner profile text.
    #[serde(default)]
    pub profile: String,

    /// Date of submission.
    pub registration_date: Date,

    /// Last day the registration is valid.
    pub expiry_date: Date,

    /// Current status.
    pub status: RegistrationStatus,

    /// Projection of the owner's `BoatR` status.
    pub boatr_verified: bool,

    /// Projection of the owner's `FishR` status.
    pub fishr_verified: bool,

    /// Audit trail, oldest first.
    pub history: Vec<HistoryEntry>,

    /// Registration this one renews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_for: Option<RegistrationId>,

    /// Stored photo URLs.
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Submitted content of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationDetails {
    /// Vessel or gear details.
    pub details: String,

    /// Owner profile text.
    pub profile: String,

    /// Owner contact number.
    pub contact: String,

    /// Owner address.
    pub address: String,

    /// Stored photo URLs.
    pub photos: Vec<String>,
}

/// Partial edit of a registration; `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationUpdate {
    /// New vessel or gear details.
    pub details: Option<String>,

    /// New owner profile text.
    pub profile: Option<String>,

    /// New contact number.
    pub contact: Option<String>,

    /// New address.
    pub address: Option<String>,

    /// Replacement photo URLs.
    pub photos: Option<Vec<String>>,
}

/// A registration's `BoatR`/`FishR` projection at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerificationFlags {
    /// `BoatR` approved.
    pub boatr: bool,

    /// `FishR` approved.
    pub fishr: bool,
}

impl VerificationFlags {
    /// Both registries approved.
    #[must_use]
    pub const fn both(self) -> bool {
        self.boatr && self.fishr
    }
}

/// Expiry date for a registration made on `date`.
#[must_use]
pub fn expiry_for(date: Date) -> Date {
    date.saturating_add(1.year())
}

impl Registration {
    /// Build a new `Pending` registration submitted by `actor` for themselves.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Forbidden`] for non-fisherfolk, and a validation error when
    /// the owner is not verified by both registries or the details are blank.
    pub fn submit(
        id: RegistrationId,
        kind: RegistrationType,
        submission: RegistrationDetails,
        flags: VerificationFlags,
        actor: &Actor,
        now: Timestamp,
        today: Date,
    ) -> Result<Self, WorkflowError> {
        actor.require(&[Role::Fisherfolk], "submit a registration")?;

        if !flags.both() {
            return Err(ValidationError::OwnerNotVerified.into());
        }

        require_text(&submission.details, "details")?;

        Ok(Self {
            id,
            owner: Owner {
                id: actor.user_id.clone(),
                name: actor.name.clone(),
                email: actor.email.clone(),
                contact: submission.contact,
                address: submission.address,
            },
            kind,
            details: submission.details,
            profile: submission.profile,
            registration_date: today,
            expiry_date: expiry_for(today),
            status: RegistrationStatus::Pending,
            boatr_verified: flags.boatr,
            fishr_verified: flags.fishr,
            history: vec![HistoryEntry::new("Submitted", actor, now)],
            renewal_for: None,
            photos: submission.photos,
        })
    }

    /// Approve or reject a pending registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the registration is `Pending`.
    pub fn review(
        &mut self,
        decision: ReviewDecision,
        remarks: Option<String>,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<(), WorkflowError> {
        actor.require(REVIEWERS, "review a registration")?;

        let (next, label, action) = match decision {
            ReviewDecision::Approve => (RegistrationStatus::Approved, "Approved", "approve"),
            ReviewDecision::Reject => (RegistrationStatus::Rejected, "Rejected", "reject"),
        };

        self.ensure_status(&[RegistrationStatus::Pending], action)?;

        self.status = next;
        self.history
            .push(HistoryEntry::new(label, actor, now).with_remarks(remarks));

        Ok(())
    }

    /// Flag an approved registration as expired.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the registration is `Approved`.
    pub fn mark_expired(&mut self, actor: &Actor, now: Timestamp) -> Result<(), WorkflowError> {
        actor.require(
            &[Role::Mao, Role::Inspector, Role::System],
            "expire a registration",
        )?;

        self.ensure_status(&[RegistrationStatus::Approved], "expire")?;

        self.status = RegistrationStatus::Expired;
        self.history.push(HistoryEntry::new("Expired", actor, now));

        Ok(())
    }

    /// Edit the owner-supplied content of a pending registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] once the registration has been reviewed.
    pub fn update_details(
        &mut self,
        update: RegistrationUpdate,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<(), WorkflowError> {
        actor.require_owner(&self.owner.id, "edit a registration")?;

        self.ensure_status(&[RegistrationStatus::Pending], "edit")?;

        if let Some(details) = &update.details {
            require_text(details, "details")?;
        }

        self.apply(update);
        self.history.push(HistoryEntry::new("Updated", actor, now));

        Ok(())
    }

    /// Clone this registration into a new `Pending` renewal record.
    ///
    /// `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the registration is `Approved` or
    /// `Expired`.
    pub fn renew(
        &self,
        id: RegistrationId,
        update: RegistrationUpdate,
        actor: &Actor,
        now: Timestamp,
        today: Date,
    ) -> Result<Self, WorkflowError> {
        actor.require_owner(&self.owner.id, "renew a registration")?;

        self.ensure_status(
            &[RegistrationStatus::Approved, RegistrationStatus::Expired],
            "renew",
        )?;

        if let Some(details) = &update.details {
            require_text(details, "details")?;
        }

        let mut renewal = Self {
            id,
            registration_date: today,
            expiry_date: expiry_for(today),
            status: RegistrationStatus::Pending,
            history: vec![HistoryEntry::new("Submitted for Renewal", actor, now)],
            renewal_for: Some(self.id.clone()),
            ..self.clone()
        };

        renewal.apply(update);

        Ok(renewal)
    }

    /// Approved and past its expiry date.
    #[must_use]
    pub fn is_due_for_expiry(&self, today: Date) -> bool {
        self.status == RegistrationStatus::Approved && self.expiry_date < today
    }

    fn apply(&mut self, update: RegistrationUpdate) {
        let RegistrationUpdate {
            details,
            profile,
            contact,
            address,
            photos,
        } = update;

        if let Some(details) = details {
            self.details = details;
        }

        if let Some(profile) = profile {
            self.profile = profile;
        }

        if let Some(contact) = contact {
            self.owner.contact = contact;
        }

        if let Some(address) = address {
            self.owner.address = address;
        }

        if let Some(photos) = photos {
            self.photos = photos;
        }
    }

    fn ensure_status(
        &self,
        allowed: &[RegistrationStatus],
        action: &'static str,
    ) -> Result<(), WorkflowError> {
        if allowed.contains(&self.status) {
            return Ok(());
        }

        Err(WorkflowError::InvalidTransition {
            entity: ENTITY,
            from: self.status.as_str(),
            action,
        })
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }

    Ok(())
}
