//! License queries.

use fishery::{
    ids::{RegistrationId, UserId},
    licenses::LicenseStatus,
};

/// Optional constraints on a license listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicensesQuery {
    pub owner: Option<UserId>,
    pub registration: Option<RegistrationId>,
    pub status: Option<LicenseStatus>,
}
