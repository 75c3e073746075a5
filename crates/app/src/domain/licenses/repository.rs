//! Licenses Repository

use fishery::{
    ids::{LicenseId, RegistrationId, UserId},
    licenses::{License, LicenseStatus},
};

use crate::{
    domain::licenses::data::LicensesQuery,
    store::{
        Collection, Filter, StoreError, StoreTransaction, create_as, query_as, require_as, save_as,
        scan_as,
    },
};

pub(crate) const COLLECTION: Collection = Collection::Licenses;

#[derive(Debug, Clone, Default)]
pub(crate) struct LicensesRepository;

impl LicensesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get(
        &self,
        tx: &mut dyn StoreTransaction,
        id: &LicenseId,
    ) -> Result<License, StoreError> {
        require_as(tx, COLLECTION, id.as_str()).await
    }

    /// Read-only listing; nothing is locked.
    pub(crate) async fn list(
        &self,
        tx: &mut dyn StoreTransaction,
        query: &LicensesQuery,
    ) -> Result<Vec<License>, StoreError> {
        scan_as(tx, COLLECTION, &filter(query)).await
    }

    /// Locks every match for the rest of the transaction.
    pub(crate) async fn for_registration(
        &self,
        tx: &mut dyn StoreTransaction,
        registration: &RegistrationId,
    ) -> Result<Vec<License>, StoreError> {
        let query = LicensesQuery {
            registration: Some(registration.clone()),
            ..LicensesQuery::default()
        };

        query_as(tx, COLLECTION, &filter(&query)).await
    }

    pub(crate) async fn create(
        &self,
        tx: &mut dyn StoreTransaction,
        license: &License,
    ) -> Result<(), StoreError> {
        create_as(tx, COLLECTION, license.id.as_str(), license).await
    }

    pub(crate) async fn save(
        &self,
        tx: &mut dyn StoreTransaction,
        license: &License,
    ) -> Result<(), StoreError> {
        save_as(tx, COLLECTION, license.id.as_str(), license).await
    }
}

fn filter(query: &LicensesQuery) -> Filter {
    Filter::all()
        .eq_opt("ownerId", query.owner.as_ref().map(UserId::as_str))
        .eq_opt(
            "registrationId",
            query.registration.as_ref().map(RegistrationId::as_str),
        )
        .eq_opt("status", query.status.map(LicenseStatus::as_str))
}
