//! Payment queries.

use fishery::{
    ids::{RegistrationId, UserId},
    payments::PaymentStatus,
};

/// Optional constraints on a payment listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentsQuery {
    pub payer: Option<UserId>,
    pub registration: Option<RegistrationId>,
    pub status: Option<PaymentStatus>,
}
