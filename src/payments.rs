//! Payments
//!
//! A payment is confirmed only after the payer, the treasury (MTO) and the agriculture
//! office (MAO) have each done their part:
//!
//! ```text
//! Pending ──treasury_submit──▶ ForVerification ──verify──▶ Paid
//!    ▲                                │
//!    │                                └──reject──▶ Failed
//!    └──────────────reopen─────────────────────────┘ (from Paid or Failed)
//! ```
//!
//! Every transition is appended to the payment's history with the acting user.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use crate::{
    actors::{Actor, Role},
    errors::{ValidationError, WorkflowError},
    history::HistoryEntry,
    ids::{PaymentId, RegistrationId, UserId},
    registrations::{Registration, RegistrationStatus},
};

const ENTITY: &str = "payment";

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Created, awaiting treasury certification.
    #[default]
    Pending,

    /// Certified by the treasury, awaiting MAO verification.
    #[serde(rename = "For Verification")]
    ForVerification,

    /// Verified by the MAO.
    Paid,

    /// Rejected by the MAO.
    Failed,
}

impl PaymentStatus {
    /// Stable name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::ForVerification => "For Verification",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Whether the treasury has certified the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MtoVerifiedStatus {
    /// Not yet certified.
    #[default]
    Unverified,

    /// Certified with an OR number.
    Verified,
}

/// Fixed reasons offered to the MAO when rejecting a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The uploaded receipt cannot be read.
    UnreadableReceipt,

    /// The uploaded OR number differs from the treasury's.
    OrNumberMismatch,

    /// The amount paid does not match the assessed fee.
    AmountMismatch,

    /// The receipt belongs to another transaction.
    WrongTransaction,

    /// Anything else; details are given in person.
    Other,
}

impl RejectionReason {
    /// User-facing copy.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnreadableReceipt => "The uploaded receipt is blurry or unreadable.",
            Self::OrNumberMismatch => {
                "The OR number you uploaded does not match the treasury's records."
            }
            Self::AmountMismatch => "The amount paid does not match the assessed fee.",
            Self::WrongTransaction => "The receipt belongs to a different transaction.",
            Self::Other => "Please visit the Municipal Agriculture Office for details.",
        }
    }
}

/// Largest amount, in centavos, a payment may carry.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Payment document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Transaction ID.
    pub id: PaymentId,

    /// Registration being paid for.
    pub registration_id: RegistrationId,

    /// Owner of the registration.
    pub payer_id: UserId,

    /// Payer's display name.
    pub payer_name: String,

    /// Amount in centavos.
    pub amount: u64,

    /// How the payer paid, e.g. `Cash`.
    pub payment_method: String,

    /// Creation date, restamped when the payment is verified.
    pub date: Date,

    /// Current status.
    pub status: PaymentStatus,

    /// Official receipt number, authoritative once set by the treasury.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    /// OR number as entered by the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_or_number: Option<String>,

    /// URL of the receipt image uploaded by the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_receipt_url: Option<String>,

    /// Treasury certification.
    pub mto_verified_status: MtoVerifiedStatus,

    /// Audit trail, oldest first.
    pub history: Vec<HistoryEntry>,
}

/// Request to open a payment against a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    /// Registration to pay for.
    pub registration_id: RegistrationId,

    /// Amount in centavos.
    pub amount: u64,

    /// How the payer pays.
    pub payment_method: String,
}

/// Evidence uploaded by the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptUpload {
    /// URL of the receipt image.
    pub receipt_url: String,

    /// OR number printed on the receipt.
    pub or_number: String,
}

/// Treasury certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasurySubmission {
    /// OR number assigned by the treasury.
    pub or_number: String,

    /// The treasury vouches for the payment.
    pub certified: bool,
}

impl Payment {
    /// Open a `Pending` payment for an approved registration.
    ///
    /// Either the owner or the treasury may open it; the registration owner is always
    /// recorded as the payer.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the registration is `Approved`.
    pub fn open(
        id: PaymentId,
        request: NewPayment,
        registration: &Registration,
        actor: &Actor,
        now: Timestamp,
        today: Date,
    ) -> Result<Self, WorkflowError> {
        match actor.role {
            Role::Fisherfolk => actor.require_owner(&registration.owner.id, "open a payment")?,
            _ => actor.require(&[Role::Mto, Role::Mao], "open a payment")?,
        }

        if registration.status != RegistrationStatus::Approved {
            return Err(WorkflowError::InvalidTransition {
                entity: "registration",
                from: registration.status.as_str(),
                action: "pay for",
            });
        }

        if request.payment_method.trim().is_empty() {
            return Err(ValidationError::EmptyField("payment method").into());
        }

        if request.amount > MAX_AMOUNT {
            return Err(ValidationError::AmountOutOfRange(request.amount).into());
        }

        Ok(Self {
            id,
            registration_id: registration.id.clone(),
            payer_id: registration.owner.id.clone(),
            payer_name: registration.owner.name.clone(),
            amount: request.amount,
            payment_method: request.payment_method,
            date: today,
            status: PaymentStatus::Pending,
            reference_number: None,
            uploaded_or_number: None,
            uploaded_receipt_url: None,
            mto_verified_status: MtoVerifiedStatus::Unverified,
            history: vec![HistoryEntry::new("Created", actor, now)],
        })
    }

    /// Attach the payer's receipt and OR number. Status is unchanged.
    ///
    /// # Errors
    ///
    /// Fails once the payment is `Paid` or `Failed`, or when either field is blank.
    pub fn upload_receipt(
        &mut self,
        upload: ReceiptUpload,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<(), WorkflowError> {
        actor.require_owner(&self.payer_id, "upload a receipt")?;

        self.ensure_status(
            &[PaymentStatus::Pending, PaymentStatus::ForVerification],
            "upload a receipt for",
        )?;

        if upload.receipt_url.trim().is_empty() {
            return Err(ValidationError::MissingUploadedReceipt.into());
        }

        if upload.or_number.trim().is_empty() {
            return Err(ValidationError::MissingUploadedOrNumber.into());
        }

        self.uploaded_receipt_url = Some(upload.receipt_url);
        self.uploaded_or_number = Some(upload.or_number.trim().to_string());
        self.history
            .push(HistoryEntry::new("Receipt Uploaded", actor, now));

        Ok(())
    }

    /// Treasury records the official OR number and certifies the payment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyOrNumber`] or [`ValidationError::NotCertified`] when
    /// the submission is incomplete; nothing is changed in that case.
    pub fn treasury_submit(
        &mut self,
        submission: TreasurySubmission,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<(), WorkflowError> {
        actor.require(&[Role::Mto], "certify a payment")?;

        self.ensure_status(&[PaymentStatus::Pending], "certify")?;

        let TreasurySubmission {
            or_number,
            certified,
        } = submission;
        let or_number = or_number.trim();

        if or_number.is_empty() {
            return Err(ValidationError::EmptyOrNumber.into());
        }

        if !certified {
            return Err(ValidationError::NotCertified.into());
        }

        self.status = PaymentStatus::ForVerification;
        self.reference_number = Some(or_number.to_string());
        self.mto_verified_status = MtoVerifiedStatus::Verified;
        self.history.push(
            HistoryEntry::new("Certified by Treasury", actor, now)
                .with_remarks(Some(format!("OR {or_number}"))),
        );

        Ok(())
    }

    /// MAO confirms the payment.
    ///
    /// Requires the treasury's certification and the payer's own evidence.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any precondition is missing, or
    /// [`WorkflowError::InvalidTransition`] unless the payment is `ForVerification`.
    pub fn verify(&mut self, actor: &Actor, now: Timestamp, today: Date) -> Result<(), WorkflowError> {
        actor.require(&[Role::Mao], "verify a payment")?;

        if self.mto_verified_status != MtoVerifiedStatus::Verified {
            return Err(ValidationError::TreasuryNotVerified.into());
        }

        if is_blank(self.uploaded_or_number.as_deref()) {
            return Err(ValidationError::MissingUploadedOrNumber.into());
        }

        if is_blank(self.uploaded_receipt_url.as_deref()) {
            return Err(ValidationError::MissingUploadedReceipt.into());
        }

        self.ensure_status(&[PaymentStatus::ForVerification], "verify")?;

        self.status = PaymentStatus::Paid;
        self.date = today;
        self.history.push(HistoryEntry::new("Verified", actor, now));

        Ok(())
    }

    /// MAO rejects the payment.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the payment is `ForVerification`.
    pub fn reject(
        &mut self,
        reason: RejectionReason,
        actor: &Actor,
        now: Timestamp,
    ) -> Result<(), WorkflowError> {
        actor.require(&[Role::Mao], "reject a payment")?;

        self.ensure_status(&[PaymentStatus::ForVerification], "reject")?;

        self.status = PaymentStatus::Failed;
        self.history.push(
            HistoryEntry::new("Rejected", actor, now)
                .with_remarks(Some(reason.description().to_string())),
        );

        Ok(())
    }

    /// MAO reopens a settled payment for correction.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] unless the payment is `Paid` or `Failed`.
    pub fn reopen(&mut self, actor: &Actor, now: Timestamp) -> Result<(), WorkflowError> {
        actor.require(&[Role::Mao], "reopen a payment")?;

        self.ensure_status(&[PaymentStatus::Paid, PaymentStatus::Failed], "reopen")?;

        self.status = PaymentStatus::Pending;
        self.mto_verified_status = MtoVerifiedStatus::Unverified;
        self.history.push(HistoryEntry::new("Reopened", actor, now));

        Ok(())
    }

    fn ensure_status(
        &self,
        allowed: &[PaymentStatus],
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

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::registrations::{
        RegistrationDetails, RegistrationType, ReviewDecision, VerificationFlags,
    };

    use super::*;

    fn actor(id: &str, role: Role) -> Actor {
        Actor {
            user_id: UserId::new(id),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn owner() -> Actor {
        actor("owner", Role::Fisherfolk)
    }

    fn mto() -> Actor {
        actor("mto", Role::Mto)
    }

    fn mao() -> Actor {
        actor("mao", Role::Mao)
    }

    fn approved_registration() -> Result<Registration, WorkflowError> {
        let mut registration = Registration::submit(
            RegistrationId::new("VES-1024"),
            RegistrationType::Vessel,
            RegistrationDetails {
                details: "name: Bangka".to_string(),
                ..RegistrationDetails::default()
            },
            VerificationFlags {
                boatr: true,
                fishr: true,
            },
            &owner(),
            Timestamp::UNIX_EPOCH,
            date(2026, 3, 1),
        )?;

        registration.review(ReviewDecision::Approve, None, &mao(), Timestamp::UNIX_EPOCH)?;

        Ok(registration)
    }

    #[test]
    fn amounts_beyond_the_limit_are_rejected() -> TestResult {
        let open = |amount| {
            Payment::open(
                PaymentId::new("TXN-1"),
                NewPayment {
                    registration_id: RegistrationId::new("VES-1024"),
                    amount,
                    payment_method: "Cash".to_string(),
                },
                &approved_registration()?,
                &owner(),
                Timestamp::UNIX_EPOCH,
                date(2026, 3, 2),
            )
        };

        assert!(open(MAX_AMOUNT).is_ok(), "the limit itself is accepted");
        assert_eq!(
            open(MAX_AMOUNT + 1).err(),
            Some(WorkflowError::Validation(ValidationError::AmountOutOfRange(
                MAX_AMOUNT + 1
            )))
        );

        Ok(())
    }

    fn pending_payment() -> Result<Payment, WorkflowError> {
        Payment::open(
            PaymentId::new("TXN-1"),
            NewPayment {
                registration_id: RegistrationId::new("VES-1024"),
                amount: 150_000,
                payment_method: "Cash".to_string(),
            },
            &approved_registration()?,
            &owner(),
            Timestamp::UNIX_EPOCH,
            date(2026, 3, 2),
        )
    }

    fn upload() -> ReceiptUpload {
        ReceiptUpload {
            receipt_url: "https://files.example.com/receipt.jpg".to_string(),
            or_number: "OR-555".to_string(),
        }
    }

    fn certify() -> TreasurySubmission {
        TreasurySubmission {
            or_number: "OR-555".to_string(),
            certified: true,
        }
    }

    #[test]
    fn treasury_submit_rejects_empty_or_number() -> TestResult {
        let mut payment = pending_payment()?;
        let before = payment.clone();

        let result = payment.treasury_submit(
            TreasurySubmission {
                or_number: "  ".to_string(),
                certified: true,
            },
            &mto(),
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(
            result,
            Err(WorkflowError::Validation(ValidationError::EmptyOrNumber))
        );
        assert_eq!(payment, before);

        Ok(())
    }

    #[test]
    fn upload_receipt_rejects_blank_or_number() -> TestResult {
        let mut payment = pending_payment()?;
        let before = payment.clone();

        let result = payment.upload_receipt(
            ReceiptUpload {
                or_number: " ".to_string(),
                ..upload()
            },
            &owner(),
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(
            result,
            Err(WorkflowError::Validation(
                ValidationError::MissingUploadedOrNumber
            ))
        );
        assert_eq!(payment, before, "a rejected upload leaves the payment untouched");

        Ok(())
    }

    #[test]
    fn treasury_submit_requires_certification() -> TestResult {
        let mut payment = pending_payment()?;

        let result = payment.treasury_submit(
            TreasurySubmission {
                or_number: "OR-1".to_string(),
                certified: false,
            },
            &mto(),
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(
            result,
            Err(WorkflowError::Validation(ValidationError::NotCertified))
        );
        assert_eq!(payment.status, PaymentStatus::Pending);

        Ok(())
    }

    #[test]
    fn treasury_submit_moves_to_for_verification() -> TestResult {
        let mut payment = pending_payment()?;

        payment.treasury_submit(certify(), &mto(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(payment.status, PaymentStatus::ForVerification);
        assert_eq!(payment.reference_number.as_deref(), Some("OR-555"));
        assert_eq!(payment.mto_verified_status, MtoVerifiedStatus::Verified);

        Ok(())
    }

    #[test]
    fn verify_requires_treasury_verification() -> TestResult {
        let mut payment = pending_payment()?;

        payment.upload_receipt(upload(), &owner(), Timestamp::UNIX_EPOCH)?;

        let before = payment.clone();
        let result = payment.verify(&mao(), Timestamp::UNIX_EPOCH, date(2026, 3, 5));

        assert_eq!(
            result,
            Err(WorkflowError::Validation(ValidationError::TreasuryNotVerified))
        );
        assert_eq!(payment, before);

        Ok(())
    }

    #[test]
    fn verify_requires_payer_evidence() -> TestResult {
        let mut payment = pending_payment()?;

        payment.treasury_submit(certify(), &mto(), Timestamp::UNIX_EPOCH)?;

        let result = payment.verify(&mao(), Timestamp::UNIX_EPOCH, date(2026, 3, 5));

        assert_eq!(
            result,
            Err(WorkflowError::Validation(
                ValidationError::MissingUploadedOrNumber
            ))
        );
        assert_eq!(payment.status, PaymentStatus::ForVerification);

        Ok(())
    }

    #[test]
    fn verify_marks_paid_and_stamps_date() -> TestResult {
        let mut payment = pending_payment()?;

        payment.upload_receipt(upload(), &owner(), Timestamp::UNIX_EPOCH)?;
        payment.treasury_submit(certify(), &mto(), Timestamp::UNIX_EPOCH)?;
        payment.verify(&mao(), Timestamp::UNIX_EPOCH, date(2026, 3, 5))?;

        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.date, date(2026, 3, 5));

        let actions: Vec<&str> = payment.history.iter().map(|h| h.action.as_str()).collect();

        assert_eq!(
            actions,
            [
                "Created",
                "Receipt Uploaded",
                "Certified by Treasury",
                "Verified"
            ]
        );

        Ok(())
    }

    #[test]
    fn paid_payment_cannot_be_verified_again() -> TestResult {
        let mut payment = pending_payment()?;

        payment.upload_receipt(upload(), &owner(), Timestamp::UNIX_EPOCH)?;
        payment.treasury_submit(certify(), &mto(), Timestamp::UNIX_EPOCH)?;
        payment.verify(&mao(), Timestamp::UNIX_EPOCH, date(2026, 3, 5))?;

        let result = payment.verify(&mao(), Timestamp::UNIX_EPOCH, date(2026, 3, 6));

        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { from: "Paid", .. })
        ));

        Ok(())
    }

    #[test]
    fn reopen_resets_treasury_verification() -> TestResult {
        let mut payment = pending_payment()?;

        payment.treasury_submit(certify(), &mto(), Timestamp::UNIX_EPOCH)?;
        payment.reject(RejectionReason::AmountMismatch, &mao(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(payment.status, PaymentStatus::Failed);

        payment.reopen(&mao(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.mto_verified_status, MtoVerifiedStatus::Unverified);

        payment.treasury_submit(certify(), &mto(), Timestamp::UNIX_EPOCH)?;

        assert_eq!(payment.status, PaymentStatus::ForVerification);

        Ok(())
    }

    #[test]
    fn reopen_pending_is_invalid() -> TestResult {
        let mut payment = pending_payment()?;

        let result = payment.reopen(&mao(), Timestamp::UNIX_EPOCH);

        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition {
                action: "reopen",
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn treasury_cannot_verify() -> TestResult {
        let mut payment = pending_payment()?;

        let result = payment.verify(&mto(), Timestamp::UNIX_EPOCH, date(2026, 3, 5));

        assert!(matches!(result, Err(WorkflowError::Forbidden { .. })));

        Ok(())
    }

    #[test]
    fn status_serializes_with_spaces() -> TestResult {
        assert_eq!(
            serde_json::to_value(PaymentStatus::ForVerification)?,
            serde_json::json!("For Verification")
        );
        assert_eq!(
            serde_json::to_value(MtoVerifiedStatus::Verified)?,
            serde_json::json!("verified")
        );

        Ok(())
    }
}
