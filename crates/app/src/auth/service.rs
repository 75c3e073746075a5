//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use fishery::actors::{Actor, Role};
use mockall::automock;

use crate::{
    auth::{AuthServiceError, IdentityProvider},
    domain::profiles::repository::ProfilesRepository,
    store::DocumentStore,
};

#[derive(Clone)]
pub struct StoreAuthService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    profiles: ProfilesRepository,
}

impl StoreAuthService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            profiles: ProfilesRepository::new(),
        }
    }
}

impl std::fmt::Debug for StoreAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAuthService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let identity = self
            .identity
            .resolve(bearer_token)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let mut tx = self.store.begin().await?;

        let profile = self.profiles.find(tx.as_mut(), &identity.user_id).await?;

        tx.commit().await?;

        let (name, role) = match profile {
            Some(profile) => (profile.name, profile.role),
            None => (
                identity.name.unwrap_or_else(|| identity.email.clone()),
                Role::Fisherfolk,
            ),
        };

        Ok(Actor {
            user_id: identity.user_id,
            name,
            email: identity.email,
            role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;
}
