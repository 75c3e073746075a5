//! Fishery prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    actors::{Actor, Role},
    errors::{ValidationError, WorkflowError},
    history::HistoryEntry,
    ids::{LicenseId, NotificationId, PaymentId, RegistrationId, TypedId, UserId},
    licenses::{License, LicenseStatus, eligible_for_issuance},
    notifications::Notification,
    payments::{
        MtoVerifiedStatus, NewPayment, Payment, PaymentStatus, ReceiptUpload, RejectionReason,
        TreasurySubmission,
    },
    registrations::{
        Owner, Registration, RegistrationDetails, RegistrationStatus, RegistrationType,
        RegistrationUpdate, ReviewDecision, VerificationFlags,
    },
    verification::{FlagStatus, Registry, VerificationSubmission, overall_status},
};
