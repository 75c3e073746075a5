//! Payment request and response models

use fishery::payments::{MtoVerifiedStatus, Payment, PaymentStatus, RejectionReason};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntryResponse;

/// Payment status filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentStatusParam {
    Pending,
    ForVerification,
    Paid,
    Failed,
}

impl From<PaymentStatusParam> for PaymentStatus {
    fn from(param: PaymentStatusParam) -> Self {
        match param {
            PaymentStatusParam::Pending => PaymentStatus::Pending,
            PaymentStatusParam::ForVerification => PaymentStatus::ForVerification,
            PaymentStatusParam::Paid => PaymentStatus::Paid,
            PaymentStatusParam::Failed => PaymentStatus::Failed,
        }
    }
}

/// Why the MAO rejected a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RejectionReasonParam {
    UnreadableReceipt,
    OrNumberMismatch,
    AmountMismatch,
    WrongTransaction,
    Other,
}

impl From<RejectionReasonParam> for RejectionReason {
    fn from(param: RejectionReasonParam) -> Self {
        match param {
            RejectionReasonParam::UnreadableReceipt => RejectionReason::UnreadableReceipt,
            RejectionReasonParam::OrNumberMismatch => RejectionReason::OrNumberMismatch,
            RejectionReasonParam::AmountMismatch => RejectionReason::AmountMismatch,
            RejectionReasonParam::WrongTransaction => RejectionReason::WrongTransaction,
            RejectionReasonParam::Other => RejectionReason::Other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    /// Transaction ID, e.g. `TXN-…`
    pub id: String,

    pub registration_id: String,
    pub payer_id: String,
    pub payer_name: String,

    /// Amount in centavos
    pub amount: u64,

    pub payment_method: String,
    pub date: String,

    /// Pending, For Verification, Paid or Failed
    pub status: String,

    /// Official receipt number recorded by the treasury
    pub reference_number: Option<String>,

    pub uploaded_or_number: Option<String>,
    pub uploaded_receipt_url: Option<String>,

    /// Whether the treasury has certified the payment
    pub mto_verified: bool,

    pub history: Vec<HistoryEntryResponse>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        PaymentResponse {
            id: payment.id.into_string(),
            registration_id: payment.registration_id.into_string(),
            payer_id: payment.payer_id.into_string(),
            payer_name: payment.payer_name,
            amount: payment.amount,
            payment_method: payment.payment_method,
            date: payment.date.to_string(),
            status: payment.status.to_string(),
            reference_number: payment.reference_number,
            uploaded_or_number: payment.uploaded_or_number,
            uploaded_receipt_url: payment.uploaded_receipt_url,
            mto_verified: payment.mto_verified_status == MtoVerifiedStatus::Verified,
            history: payment.history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentsResponse {
    /// Matching payments
    pub payments: Vec<PaymentResponse>,
}

impl From<Vec<Payment>> for PaymentsResponse {
    fn from(payments: Vec<Payment>) -> Self {
        PaymentsResponse {
            payments: payments.into_iter().map(Into::into).collect(),
        }
    }
}
