//! Payer notifications

use jiff::Timestamp;
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

use crate::{
    ids::{NotificationId, PaymentId, UserId},
    payments::{Payment, RejectionReason},
};

/// Notification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,

    /// User the notification is addressed to.
    pub recipient_id: UserId,

    /// Short headline.
    pub title: String,

    /// Body text.
    pub message: String,

    /// Moment the notification was written.
    pub created_at: Timestamp,

    /// Whether the recipient has marked it read.
    pub read: bool,

    /// Payment the notification is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
}

impl Notification {
    /// Tell the payer their payment was confirmed.
    #[must_use]
    pub fn payment_verified(payment: &Payment, now: Timestamp) -> Self {
        Self::for_payment(
            payment,
            "Payment Verified",
            format!(
                "Your payment of {} for registration {} has been verified. Official receipt: {}.",
                format_amount(payment.amount),
                payment.registration_id,
                payment.reference_number.as_deref().unwrap_or("n/a"),
            ),
            now,
        )
    }

    /// Tell the payer their payment was rejected, and why.
    #[must_use]
    pub fn payment_rejected(payment: &Payment, reason: RejectionReason, now: Timestamp) -> Self {
        Self::for_payment(
            payment,
            "Payment Rejected",
            format!(
                "Your payment of {} for registration {} was rejected. {}",
                format_amount(payment.amount),
                payment.registration_id,
                reason.description(),
            ),
            now,
        )
    }

    fn for_payment(payment: &Payment, title: &str, message: String, now: Timestamp) -> Self {
        Self {
            id: NotificationId::generate(),
            recipient_id: payment.payer_id.clone(),
            title: title.to_string(),
            message,
            created_at: now,
            read: false,
            payment_id: Some(payment.id.clone()),
        }
    }
}

/// Format centavos as Philippine pesos.
///
/// Payments never exceed [`MAX_AMOUNT`](crate::payments::MAX_AMOUNT); anything larger is
/// written out without grouping rather than clamped.
#[must_use]
pub fn format_amount(centavos: u64) -> String {
    match i64::try_from(centavos) {
        Ok(minor) => Money::from_minor(minor, iso::PHP).to_string(),
        Err(_) => format!("₱{}.{:02}", centavos / 100, centavos % 100),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::{
        ids::RegistrationId,
        payments::{MtoVerifiedStatus, PaymentStatus},
    };

    use super::*;

    fn payment() -> Payment {
        Payment {
            id: PaymentId::new("TXN-1"),
            registration_id: RegistrationId::new("VES-1024"),
            payer_id: UserId::new("owner"),
            payer_name: "Owner".to_string(),
            amount: 150_000,
            payment_method: "Cash".to_string(),
            date: date(2026, 2, 1),
            status: PaymentStatus::Failed,
            reference_number: Some("OR-1".to_string()),
            uploaded_or_number: None,
            uploaded_receipt_url: None,
            mto_verified_status: MtoVerifiedStatus::Verified,
            history: vec![],
        }
    }

    #[test]
    fn rejection_notice_goes_to_payer_with_reason() {
        let notice = Notification::payment_rejected(
            &payment(),
            RejectionReason::UnreadableReceipt,
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(notice.recipient_id, UserId::new("owner"));
        assert!(!notice.read, "new notifications are unread");
        assert!(
            notice
                .message
                .contains(RejectionReason::UnreadableReceipt.description()),
            "message should carry the reason copy: {}",
            notice.message
        );
        assert!(notice.message.contains("VES-1024"), "{}", notice.message);
    }

    #[test]
    fn amounts_are_formatted_in_pesos() {
        let formatted = format_amount(150_000);

        assert!(formatted.contains("1,500"), "got {formatted}");
    }

    #[test]
    fn huge_amounts_are_not_clamped() {
        let largest = format_amount(u64::MAX);

        assert_ne!(
            largest,
            format_amount(crate::payments::MAX_AMOUNT),
            "distinct amounts must render differently"
        );
        assert_eq!(largest, "₱184467440737095516.15");
    }
}
