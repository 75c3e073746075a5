//! Verification Submissions Repository

use fishery::{ids::UserId, verification::VerificationSubmission};

use crate::store::{
    Collection, Filter, StoreError, StoreTransaction, create_as, get_as, save_as, scan_as,
};

const COLLECTION: Collection = Collection::VerificationSubmissions;

#[derive(Debug, Clone, Default)]
pub(crate) struct VerificationRepository;

impl VerificationRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Submissions are keyed by owner ID.
    pub(crate) async fn find(
        &self,
        tx: &mut dyn StoreTransaction,
        owner: &UserId,
    ) -> Result<Option<VerificationSubmission>, StoreError> {
        get_as(tx, COLLECTION, owner.as_str()).await
    }

    pub(crate) async fn list(
        &self,
        tx: &mut dyn StoreTransaction,
    ) -> Result<Vec<VerificationSubmission>, StoreError> {
        scan_as(tx, COLLECTION, &Filter::all()).await
    }

    pub(crate) async fn create(
        &self,
        tx: &mut dyn StoreTransaction,
        submission: &VerificationSubmission,
    ) -> Result<(), StoreError> {
        create_as(tx, COLLECTION, submission.owner_id.as_str(), submission).await
    }

    pub(crate) async fn save(
        &self,
        tx: &mut dyn StoreTransaction,
        submission: &VerificationSubmission,
    ) -> Result<(), StoreError> {
        save_as(tx, COLLECTION, submission.owner_id.as_str(), submission).await
    }
}
