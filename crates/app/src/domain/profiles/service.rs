//! Profiles Service

use std::sync::Arc;

use fishery::ids::UserId;
use tracing::info;

use crate::{
    domain::{
        errors::ServiceError,
        profiles::{data::Profile, repository::ProfilesRepository},
    },
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct StoreProfilesService {
    store: Arc<dyn DocumentStore>,
    repository: ProfilesRepository,
}

impl StoreProfilesService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            repository: ProfilesRepository::new(),
        }
    }

    /// Create or replace the profile that assigns a role to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    #[tracing::instrument(
        name = "profiles.service.put",
        skip(self, profile),
        fields(user_id = %profile.user_id, role = %profile.role),
        err
    )]
    pub async fn put(&self, profile: Profile) -> Result<Profile, ServiceError> {
        let mut tx = self.store.begin().await?;

        self.repository.put(tx.as_mut(), &profile).await?;

        tx.commit().await?;

        info!(user_id = %profile.user_id, role = %profile.role, "saved profile");

        Ok(profile)
    }

    /// Look up a user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn find(&self, user: &UserId) -> Result<Option<Profile>, ServiceError> {
        let mut tx = self.store.begin().await?;

        let profile = self.repository.find(tx.as_mut(), user).await?;

        tx.commit().await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use fishery::actors::Role;
    use testresult::TestResult;

    use crate::store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn put_replaces_existing_profile() -> TestResult {
        let profiles = StoreProfilesService::new(Arc::new(MemoryStore::new()));
        let user = UserId::new("u-9");

        assert_eq!(profiles.find(&user).await?, None);

        profiles
            .put(Profile {
                user_id: user.clone(),
                name: "Clerk".to_string(),
                role: Role::Mto,
            })
            .await?;

        let promoted = profiles
            .put(Profile {
                user_id: user.clone(),
                name: "Clerk".to_string(),
                role: Role::Mao,
            })
            .await?;

        assert_eq!(profiles.find(&user).await?, Some(promoted));

        Ok(())
    }
}
