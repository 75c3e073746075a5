//! Workflow errors.

use thiserror::Error;

use crate::{actors::Role, ids::RegistrationId, registrations::RegistrationType};

/// A required field was missing or a precondition on submitted data failed.
///
/// No partial write happens when one of these is raised; the caller is expected to
/// re-prompt the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The treasury submitted a blank official receipt number.
    #[error("an OR number is required")]
    EmptyOrNumber,

    /// The treasury did not certify the payment.
    #[error("the payment must be certified by the treasury")]
    NotCertified,

    /// The payer has not provided the official receipt number.
    #[error("the payer has not uploaded an OR number")]
    MissingUploadedOrNumber,

    /// The payer has not provided a receipt image.
    #[error("the payer has not uploaded a receipt")]
    MissingUploadedReceipt,

    /// The treasury has not certified the payment yet.
    #[error("the treasury has not verified this payment")]
    TreasuryNotVerified,

    /// The owner is missing at least one of the BoatR and FishR verifications.
    #[error("the owner has not been verified by both BoatR and FishR")]
    OwnerNotVerified,

    /// The named field was blank.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A payment amount above [`MAX_AMOUNT`](crate::payments::MAX_AMOUNT).
    #[error("amount of {0} centavos is out of range")]
    AmountOutOfRange(u64),
}

/// Errors raised by the workflow rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Submitted data failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{collection} {id} not found")]
    NotFound {
        /// Collection the record was looked up in
        collection: &'static str,

        /// ID that was looked up
        id: String,
    },

    /// The action is not allowed from the record's current status.
    #[error("cannot {action} {entity} in status {from}")]
    InvalidTransition {
        /// Kind of record, e.g. `payment`
        entity: &'static str,

        /// Status the record was in
        from: &'static str,

        /// Action that was attempted
        action: &'static str,
    },

    /// The acting role is not permitted to perform the action.
    #[error("role {role} may not {action}")]
    Forbidden {
        /// Role of the actor
        role: Role,

        /// Action that was refused
        action: &'static str,
    },

    /// The registration already has a license.
    #[error("a license has already been issued for registration {0}")]
    AlreadyIssued(RegistrationId),

    /// The owner already has a pending registration of the same type.
    #[error("owner {owner} already has a pending {kind} registration")]
    DuplicateSubmission {
        /// Owner's user ID
        owner: String,

        /// Type of the pending registration
        kind: RegistrationType,
    },
}

impl WorkflowError {
    /// Shorthand for [`WorkflowError::NotFound`].
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}
