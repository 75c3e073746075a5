//! Payments Repository

use fishery::{
    ids::{PaymentId, RegistrationId, UserId},
    payments::{Payment, PaymentStatus},
};

use crate::{
    domain::payments::data::PaymentsQuery,
    store::{
        Collection, Filter, StoreError, StoreTransaction, create_as, query_as, require_as, save_as,
        scan_as,
    },
};

const COLLECTION: Collection = Collection::Payments;

#[derive(Debug, Clone, Default)]
pub(crate) struct PaymentsRepository;

impl PaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get(
        &self,
        tx: &mut dyn StoreTransaction,
        id: &PaymentId,
    ) -> Result<Payment, StoreError> {
        require_as(tx, COLLECTION, id.as_str()).await
    }

    /// Read-only listing; nothing is locked.
    pub(crate) async fn list(
        &self,
        tx: &mut dyn StoreTransaction,
        query: &PaymentsQuery,
    ) -> Result<Vec<Payment>, StoreError> {
        scan_as(tx, COLLECTION, &filter(query)).await
    }

    /// Locks every match for the rest of the transaction.
    pub(crate) async fn for_registration(
        &self,
        tx: &mut dyn StoreTransaction,
        registration: &RegistrationId,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<Payment>, StoreError> {
        let query = PaymentsQuery {
            registration: Some(registration.clone()),
            status,
            ..PaymentsQuery::default()
        };

        query_as(tx, COLLECTION, &filter(&query)).await
    }

    pub(crate) async fn create(
        &self,
        tx: &mut dyn StoreTransaction,
        payment: &Payment,
    ) -> Result<(), StoreError> {
        create_as(tx, COLLECTION, payment.id.as_str(), payment).await
    }

    pub(crate) async fn save(
        &self,
        tx: &mut dyn StoreTransaction,
        payment: &Payment,
    ) -> Result<(), StoreError> {
        save_as(tx, COLLECTION, payment.id.as_str(), payment).await
    }
}

fn filter(query: &PaymentsQuery) -> Filter {
    Filter::all()
        .eq_opt("payerId", query.payer.as_ref().map(UserId::as_str))
        .eq_opt(
            "registrationId",
            query.registration.as_ref().map(RegistrationId::as_str),
        )
        .eq_opt("status", query.status.map(PaymentStatus::as_str))
}
