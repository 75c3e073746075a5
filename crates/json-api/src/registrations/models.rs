//! Registration request and response models

use fishery::registrations::{
    Registration, RegistrationStatus, RegistrationType, RegistrationUpdate, ReviewDecision,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntryResponse;

/// What is being registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RegistrationTypeParam {
    Vessel,
    Gear,
}

impl From<RegistrationTypeParam> for RegistrationType {
    fn from(param: RegistrationTypeParam) -> Self {
        match param {
            RegistrationTypeParam::Vessel => RegistrationType::Vessel,
            RegistrationTypeParam::Gear => RegistrationType::Gear,
        }
    }
}

/// Registration status filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RegistrationStatusParam {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl From<RegistrationStatusParam> for RegistrationStatus {
    fn from(param: RegistrationStatusParam) -> Self {
        match param {
            RegistrationStatusParam::Pending => RegistrationStatus::Pending,
            RegistrationStatusParam::Approved => RegistrationStatus::Approved,
            RegistrationStatusParam::Rejected => RegistrationStatus::Rejected,
            RegistrationStatusParam::Expired => RegistrationStatus::Expired,
        }
    }
}

/// Review outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReviewDecisionParam {
    Approve,
    Reject,
}

impl From<ReviewDecisionParam> for ReviewDecision {
    fn from(param: ReviewDecisionParam) -> Self {
        match param {
            ReviewDecisionParam::Approve => ReviewDecision::Approve,
            ReviewDecisionParam::Reject => ReviewDecision::Reject,
        }
    }
}

/// Partial edit of a registration; omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationUpdateRequest {
    pub details: Option<String>,
    pub profile: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub photos: Option<Vec<String>>,
}

impl From<RegistrationUpdateRequest> for RegistrationUpdate {
    fn from(request: RegistrationUpdateRequest) -> Self {
        RegistrationUpdate {
            details: request.details,
            profile: request.profile,
            contact: request.contact,
            address: request.address,
            photos: request.photos,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationResponse {
    /// Registration ID, e.g. `VES-12` or `REN-VES-12-1`
    pub id: String,

    /// Vessel or Gear
    #[serde(rename = "type")]
    pub kind: String,

    /// Pending, Approved, Rejected or Expired
    pub status: String,

    pub owner_id: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_contact: String,
    pub owner_address: String,

    /// Vessel or gear details
    pub details: String,

    pub profile: String,
    pub registration_date: String,
    pub expiry_date: String,
    pub boatr_verified: bool,
    pub fishr_verified: bool,

    /// Registration this one renews
    pub renewal_for: Option<String>,

    pub photos: Vec<String>,
    pub history: Vec<HistoryEntryResponse>,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        RegistrationResponse {
            id: registration.id.into_string(),
            kind: registration.kind.to_string(),
            status: registration.status.to_string(),
            owner_id: registration.owner.id.into_string(),
            owner_name: registration.owner.name,
            owner_email: registration.owner.email,
            owner_contact: registration.owner.contact,
            owner_address: registration.owner.address,
            details: registration.details,
            profile: registration.profile,
            registration_date: registration.registration_date.to_string(),
            expiry_date: registration.expiry_date.to_string(),
            boatr_verified: registration.boatr_verified,
            fishr_verified: registration.fishr_verified,
            renewal_for: registration.renewal_for.map(String::from),
            photos: registration.photos,
            history: registration.history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationsResponse {
    /// Matching registrations
    pub registrations: Vec<RegistrationResponse>,
}

impl From<Vec<Registration>> for RegistrationsResponse {
    fn from(registrations: Vec<Registration>) -> Self {
        RegistrationsResponse {
            registrations: registrations.into_iter().map(Into::into).collect(),
        }
    }
}
