//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, IdentityProvider, StoreAuthService},
    clock::Clock,
    database,
    domain::{
        licenses::{LicensesService, StoreLicensesService},
        notifications::{NotificationsService, StoreNotificationsService},
        payments::{PaymentsService, StorePaymentsService},
        registrations::{RegistrationsService, StoreRegistrationsService},
        verification::{StoreVerificationService, VerificationService},
    },
    store::{DocumentStore, MemoryStore, PgDocumentStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn DocumentStore>,
    pub registrations: Arc<dyn RegistrationsService>,
    pub payments: Arc<dyn PaymentsService>,
    pub licenses: Arc<dyn LicensesService>,
    pub verification: Arc<dyn VerificationService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Wire every service to `store`.
    #[must_use]
    pub fn with_store(
        store: Arc<dyn DocumentStore>,
        clock: &Clock,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            registrations: Arc::new(StoreRegistrationsService::new(store.clone(), clock.clone())),
            payments: Arc::new(StorePaymentsService::new(store.clone(), clock.clone())),
            licenses: Arc::new(StoreLicensesService::new(store.clone(), clock.clone())),
            verification: Arc::new(StoreVerificationService::new(store.clone(), clock.clone())),
            notifications: Arc::new(StoreNotificationsService::new(store.clone())),
            auth: Arc::new(StoreAuthService::new(store.clone(), identity)),
            store,
        }
    }

    /// Build application context over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(identity: Arc<dyn IdentityProvider>) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), &Clock::system(), identity)
    }

    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::with_store(
            Arc::new(PgDocumentStore::new(pool)),
            &Clock::system(),
            identity,
        ))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
