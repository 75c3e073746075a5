//! Verification views.

use fishery::verification::{FlagStatus, VerificationSubmission};
use serde::Serialize;

/// A submission together with its derived overall status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationView {
    #[serde(flatten)]
    pub submission: VerificationSubmission,

    pub overall_status: FlagStatus,
}

impl From<VerificationSubmission> for VerificationView {
    fn from(submission: VerificationSubmission) -> Self {
        Self {
            overall_status: submission.overall_status(),
            submission,
        }
    }
}
