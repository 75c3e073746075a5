//! Licenses
//!
//! A license is issued once, manually, for a registration that is `Approved` and has a
//! `Paid` payment. Eligibility is a pure set computation over the three collections and
//! must be recomputed whenever any of them changes.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{Timestamp, civil::Date};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    actors::{Actor, Role},
    errors::WorkflowError,
    ids::{LicenseId, PaymentId, RegistrationId},
    payments::{Payment, PaymentStatus},
    registrations::{Owner, Registration, RegistrationStatus, RegistrationType},
};

/// License status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LicenseStatus {
    /// In force until its expiry date.
    #[default]
    Active,

    /// Past its expiry date.
    Expired,

    /// Withdrawn by the MAO before expiry.
    Revoked,
}

impl LicenseStatus {
    /// Stable name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Revoked => "Revoked",
        }
    }
}

impl Display for LicenseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// License document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    /// License ID, derived from the registration type and payment.
    pub id: LicenseId,

    /// Registration the license was issued for.
    pub registration_id: RegistrationId,

    /// Paid payment that settled the registration.
    pub payment_id: PaymentId,

    /// Owner details copied from the registration.
    #[serde(flatten)]
    pub owner: Owner,

    /// Vessel or gear.
    #[serde(rename = "type")]
    pub kind: RegistrationType,

    /// Current status.
    pub status: LicenseStatus,

    /// Date of issuance.
    pub issue_date: Date,

    /// Last day the license is valid.
    pub expiry_date: Date,

    /// User ID of the issuing MAO.
    pub issued_by: String,

    /// Moment of issuance.
    pub issued_at: Timestamp,
}

/// Licenses expire on the last day of the year they were issued in.
#[must_use]
pub fn expiry_for(issue_date: Date) -> Date {
    issue_date.last_of_year()
}

impl License {
    /// Build the license for an approved, paid registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the registration is not `Approved` or the
    /// payment is not a `Paid` payment for it.
    pub fn issue(
        registration: &Registration,
        payment: &Payment,
        actor: &Actor,
        now: Timestamp,
        today: Date,
    ) -> Result<Self, WorkflowError> {
        actor.require(&[Role::Mao], "issue a license")?;

        if registration.status != RegistrationStatus::Approved {
            return Err(WorkflowError::not_found(
                "approved registration",
                registration.id.as_str(),
            ));
        }

        if payment.status != PaymentStatus::Paid || payment.registration_id != registration.id {
            return Err(WorkflowError::not_found(
                "paid payment",
                registration.id.as_str(),
            ));
        }

        Ok(Self {
            id: LicenseId::for_payment(registration.kind, &payment.id),
            registration_id: registration.id.clone(),
            payment_id: payment.id.clone(),
            owner: registration.owner.clone(),
            kind: registration.kind,
            status: LicenseStatus::Active,
            issue_date: today,
            expiry_date: expiry_for(today),
            issued_by: actor.name.clone(),
            issued_at: now,
        })
    }

    /// Revoke an active license.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the license is `Active`.
    pub fn revoke(&mut self, actor: &Actor) -> Result<(), WorkflowError> {
        actor.require(&[Role::Mao], "revoke a license")?;

        if self.status != LicenseStatus::Active {
            return Err(WorkflowError::InvalidTransition {
                entity: "license",
                from: self.status.as_str(),
                action: "revoke",
            });
        }

        self.status = LicenseStatus::Revoked;

        Ok(())
    }
}

/// Approved registrations with a paid payment and no license yet.
///
/// Preserves the order of `registrations`.
pub fn eligible_for_issuance<'a>(
    registrations: &'a [Registration],
    payments: &[Payment],
    licenses: &[License],
) -> Vec<&'a Registration> {
    let paid: FxHashSet<&RegistrationId> = payments
        .iter()
        .filter(|payment| payment.status == PaymentStatus::Paid)
        .map(|payment| &payment.registration_id)
        .collect();

    let licensed: FxHashSet<&RegistrationId> = licenses
        .iter()
        .map(|license| &license.registration_id)
        .collect();

    registrations
        .iter()
        .filter(|registration| registration.status == RegistrationStatus::Approved)
        .filter(|registration| paid.contains(&registration.id))
        .filter(|registration| !licensed.contains(&registration.id))
        .collect()
}
