//! Registrations Repository

use fishery::{
    ids::{RegistrationId, UserId},
    registrations::{Registration, RegistrationStatus, RegistrationType, VerificationFlags},
};
use serde_json::json;

use crate::{
    domain::registrations::data::RegistrationsQuery,
    store::{
        Collection, Filter, StoreError, StoreTransaction, create_as, query_as, require_as, save_as,
        scan_as,
    },
};

const COLLECTION: Collection = Collection::Registrations;

#[derive(Debug, Clone, Default)]
pub(crate) struct RegistrationsRepository;

impl RegistrationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get(
        &self,
        tx: &mut dyn StoreTransaction,
        id: &RegistrationId,
    ) -> Result<Registration, StoreError> {
        require_as(tx, COLLECTION, id.as_str()).await
    }

    /// Read-only listing; nothing is locked.
    pub(crate) async fn list(
        &self,
        tx: &mut dyn StoreTransaction,
        query: &RegistrationsQuery,
    ) -> Result<Vec<Registration>, StoreError> {
        scan_as(tx, COLLECTION, &filter(query)).await
    }

    /// Like [`Self::list`], locking every match for the rest of the transaction.
    pub(crate) async fn list_for_update(
        &self,
        tx: &mut dyn StoreTransaction,
        query: &RegistrationsQuery,
    ) -> Result<Vec<Registration>, StoreError> {
        query_as(tx, COLLECTION, &filter(query)).await
    }

    pub(crate) async fn pending_for(
        &self,
        tx: &mut dyn StoreTransaction,
        owner: &UserId,
        kind: RegistrationType,
    ) -> Result<Vec<Registration>, StoreError> {
        self.list_for_update(
            tx,
            &RegistrationsQuery {
                owner: Some(owner.clone()),
                status: Some(RegistrationStatus::Pending),
                kind: Some(kind),
            },
        )
        .await
    }

    pub(crate) async fn create(
        &self,
        tx: &mut dyn StoreTransaction,
        registration: &Registration,
    ) -> Result<(), StoreError> {
        create_as(tx, COLLECTION, registration.id.as_str(), registration).await
    }

    pub(crate) async fn save(
        &self,
        tx: &mut dyn StoreTransaction,
        registration: &Registration,
    ) -> Result<(), StoreError> {
        save_as(tx, COLLECTION, registration.id.as_str(), registration).await
    }

    /// Rewrite the verification projection on every registration of `owner`.
    pub(crate) async fn project_flags(
        &self,
        tx: &mut dyn StoreTransaction,
        owner: &UserId,
        flags: VerificationFlags,
    ) -> Result<Vec<RegistrationId>, StoreError> {
        let owned = self
            .list_for_update(
                tx,
                &RegistrationsQuery {
                    owner: Some(owner.clone()),
                    ..RegistrationsQuery::default()
                },
            )
            .await?;

        let mut updated = Vec::with_capacity(owned.len());

        for registration in owned {
            tx.update(
                COLLECTION,
                registration.id.as_str(),
                json!({
                    "boatrVerified": flags.boatr,
                    "fishrVerified": flags.fishr,
                }),
            )
            .await?;

            updated.push(registration.id);
        }

        Ok(updated)
    }
}

fn filter(query: &RegistrationsQuery) -> Filter {
    Filter::all()
        .eq_opt("ownerId", query.owner.as_ref().map(UserId::as_str))
        .eq_opt("status", query.status.map(RegistrationStatus::as_str))
        .eq_opt("type", query.kind.map(RegistrationType::as_str))
}
