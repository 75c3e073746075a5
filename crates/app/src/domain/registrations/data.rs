//! Registration queries.

use fishery::{
    ids::UserId,
    registrations::{RegistrationStatus, RegistrationType},
};

/// Optional constraints on a registration listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationsQuery {
    pub owner: Option<UserId>,
    pub status: Option<RegistrationStatus>,
    pub kind: Option<RegistrationType>,
}
