//! Profiles Repository

use fishery::ids::UserId;

use crate::{
    domain::profiles::data::Profile,
    store::{Collection, StoreError, StoreTransaction, create_as, get_as, save_as},
};

const COLLECTION: Collection = Collection::Profiles;

#[derive(Debug, Clone, Default)]
pub(crate) struct ProfilesRepository;

impl ProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find(
        &self,
        tx: &mut dyn StoreTransaction,
        user: &UserId,
    ) -> Result<Option<Profile>, StoreError> {
        get_as(tx, COLLECTION, user.as_str()).await
    }

    /// Insert or replace the profile for `profile.user_id`.
    pub(crate) async fn put(
        &self,
        tx: &mut dyn StoreTransaction,
        profile: &Profile,
    ) -> Result<(), StoreError> {
        if self.find(tx, &profile.user_id).await?.is_some() {
            save_as(tx, COLLECTION, profile.user_id.as_str(), profile).await
        } else {
            create_as(tx, COLLECTION, profile.user_id.as_str(), profile).await
        }
    }
}
