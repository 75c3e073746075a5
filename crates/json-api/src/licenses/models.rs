//! License request and response models

use fishery::licenses::{License, LicenseStatus};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// License status filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LicenseStatusParam {
    Active,
    Expired,
    Revoked,
}

impl From<LicenseStatusParam> for LicenseStatus {
    fn from(param: LicenseStatusParam) -> Self {
        match param {
            LicenseStatusParam::Active => LicenseStatus::Active,
            LicenseStatusParam::Expired => LicenseStatus::Expired,
            LicenseStatusParam::Revoked => LicenseStatus::Revoked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LicenseResponse {
    /// License ID, `LIC-<TYPE>-<transaction>`
    pub id: String,

    pub registration_id: String,
    pub payment_id: String,
    pub owner_id: String,
    pub owner_name: String,

    /// Vessel or Gear
    #[serde(rename = "type")]
    pub kind: String,

    /// Active, Expired or Revoked
    pub status: String,

    pub issue_date: String,

    /// Always December 31st of the issue year
    pub expiry_date: String,

    /// Display name of the issuing officer
    pub issued_by: String,

    pub issued_at: String,
}

impl From<License> for LicenseResponse {
    fn from(license: License) -> Self {
        LicenseResponse {
            id: license.id.into_string(),
            registration_id: license.registration_id.into_string(),
            payment_id: license.payment_id.into_string(),
            owner_id: license.owner.id.into_string(),
            owner_name: license.owner.name,
            kind: license.kind.to_string(),
            status: license.status.to_string(),
            issue_date: license.issue_date.to_string(),
            expiry_date: license.expiry_date.to_string(),
            issued_by: license.issued_by,
            issued_at: license.issued_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LicensesResponse {
    /// Matching licenses
    pub licenses: Vec<LicenseResponse>,
}

impl From<Vec<License>> for LicensesResponse {
    fn from(licenses: Vec<License>) -> Self {
        LicensesResponse {
            licenses: licenses.into_iter().map(Into::into).collect(),
        }
    }
}
