//! Verification request and response models

use fishery::verification::{FlagStatus, Registry};
use fishery_app::domain::verification::data::VerificationView;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntryResponse;

/// National registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RegistryParam {
    FishR,
    BoatR,
}

impl From<RegistryParam> for Registry {
    fn from(param: RegistryParam) -> Self {
        match param {
            RegistryParam::FishR => Registry::FishR,
            RegistryParam::BoatR => Registry::BoatR,
        }
    }
}

/// Per-registry status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FlagStatusParam {
    Pending,
    Approved,
    Rejected,
}

impl From<FlagStatusParam> for FlagStatus {
    fn from(param: FlagStatusParam) -> Self {
        match param {
            FlagStatusParam::Pending => FlagStatus::Pending,
            FlagStatusParam::Approved => FlagStatus::Approved,
            FlagStatusParam::Rejected => FlagStatus::Rejected,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerificationResponse {
    pub owner_id: String,
    pub owner_name: String,
    pub fishr_status: String,
    pub boatr_status: String,

    /// Approved only when both registries approve; Rejected when either rejects
    pub overall_status: String,

    pub submitted_at: String,
    pub history: Vec<HistoryEntryResponse>,
}

impl From<VerificationView> for VerificationResponse {
    fn from(view: VerificationView) -> Self {
        let submission = view.submission;

        VerificationResponse {
            owner_id: submission.owner_id.into_string(),
            owner_name: submission.owner_name,
            fishr_status: submission.fishr_status.to_string(),
            boatr_status: submission.boatr_status.to_string(),
            overall_status: view.overall_status.to_string(),
            submitted_at: submission.submitted_at.to_string(),
            history: submission.history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerificationsResponse {
    /// Every submission
    pub verifications: Vec<VerificationResponse>,
}
