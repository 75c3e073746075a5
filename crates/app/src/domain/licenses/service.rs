//! Licenses Service

use std::sync::Arc;

use async_trait::async_trait;
use fishery::{
    actors::{Actor, Role},
    errors::WorkflowError,
    ids::{LicenseId, RegistrationId},
    licenses::{License, eligible_for_issuance},
    payments::PaymentStatus,
    registrations::{Registration, RegistrationStatus},
};
use mockall::automock;
use tracing::{Span, info};

use crate::{
    clock::Clock,
    domain::{
        errors::ServiceError,
        licenses::{data::LicensesQuery, repository::LicensesRepository},
        payments::{data::PaymentsQuery, repository::PaymentsRepository},
        registrations::{data::RegistrationsQuery, repository::RegistrationsRepository},
    },
    store::{DocumentStore, StoreError},
};

#[derive(Debug, Clone)]
pub struct StoreLicensesService {
    store: Arc<dyn DocumentStore>,
    clock: Clock,
    licenses: LicensesRepository,
    registrations: RegistrationsRepository,
    payments: PaymentsRepository,
}

impl StoreLicensesService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        Self {
            store,
            clock,
            licenses: LicensesRepository::new(),
            registrations: RegistrationsRepository::new(),
            payments: PaymentsRepository::new(),
        }
    }
}

#[async_trait]
impl LicensesService for StoreLicensesService {
    #[tracing::instrument(
        name = "licenses.service.eligible",
        skip(self, actor),
        fields(user_id = %actor.user_id, eligible = tracing::field::Empty),
        err
    )]
    async fn eligible(&self, actor: Actor) -> Result<Vec<Registration>, ServiceError> {
        actor.require(&[Role::Mao], "list registrations eligible for a license")?;

        let mut tx = self.store.begin().await?;

        let registrations = self
            .registrations
            .list(
                tx.as_mut(),
                &RegistrationsQuery {
                    status: Some(RegistrationStatus::Approved),
                    ..RegistrationsQuery::default()
                },
            )
            .await?;

        let payments = self
            .payments
            .list(
                tx.as_mut(),
                &PaymentsQuery {
                    status: Some(PaymentStatus::Paid),
                    ..PaymentsQuery::default()
                },
            )
            .await?;

        let licenses = self
            .licenses
            .list(tx.as_mut(), &LicensesQuery::default())
            .await?;

        tx.commit().await?;

        let eligible: Vec<Registration> =
            eligible_for_issuance(&registrations, &payments, &licenses)
                .into_iter()
                .cloned()
                .collect();

        Span::current().record("eligible", eligible.len());

        Ok(eligible)
    }

    #[tracing::instrument(
        name = "licenses.service.issue",
        skip(self, actor),
        fields(
            user_id = %actor.user_id,
            registration_id = %registration_id,
            license_id = tracing::field::Empty
        ),
        err
    )]
    async fn issue(
        &self,
        actor: Actor,
        registration_id: RegistrationId,
    ) -> Result<License, ServiceError> {
        let mut tx = self.store.begin().await?;

        let registration = self
            .registrations
            .get(tx.as_mut(), &registration_id)
            .await?;

        let issued = self
            .licenses
            .for_registration(tx.as_mut(), &registration.id)
            .await?;

        if !issued.is_empty() {
            return Err(WorkflowError::AlreadyIssued(registration.id).into());
        }

        let paid = self
            .payments
            .for_registration(tx.as_mut(), &registration.id, Some(PaymentStatus::Paid))
            .await?;

        let payment = paid
            .first()
            .ok_or_else(|| WorkflowError::not_found("paid payment", registration.id.as_str()))?;

        let license = License::issue(
            &registration,
            payment,
            &actor,
            self.clock.now(),
            self.clock.today(),
        )?;

        self.licenses
            .create(tx.as_mut(), &license)
            .await
            .map_err(|error| match error {
                StoreError::Conflict { .. } => {
                    WorkflowError::AlreadyIssued(registration.id.clone()).into()
                }
                other => ServiceError::from(other),
            })?;

        tx.commit().await?;

        Span::current().record("license_id", tracing::field::display(&license.id));

        info!(license_id = %license.id, registration_id = %registration.id, "issued license");

        Ok(license)
    }

    #[tracing::instrument(
        name = "licenses.service.get",
        skip(self, actor),
        fields(user_id = %actor.user_id, license_id = %id),
        err
    )]
    async fn get(&self, actor: Actor, id: LicenseId) -> Result<License, ServiceError> {
        let mut tx = self.store.begin().await?;

        let license = self.licenses.get(tx.as_mut(), &id).await?;

        tx.commit().await?;

        actor.require_viewer(&license.owner.id, "view a license")?;

        Ok(license)
    }

    #[tracing::instrument(
        name = "licenses.service.list",
        skip(self, actor),
        fields(user_id = %actor.user_id),
        err
    )]
    async fn list(&self, actor: Actor, query: LicensesQuery) -> Result<Vec<License>, ServiceError> {
        let query = match actor.role {
            Role::Fisherfolk => LicensesQuery {
                owner: Some(actor.user_id),
                ..query
            },
            _ => query,
        };

        let mut tx = self.store.begin().await?;

        let licenses = self.licenses.list(tx.as_mut(), &query).await?;

        tx.commit().await?;

        Ok(licenses)
    }

    #[tracing::instrument(
        name = "licenses.service.revoke",
        skip(self, actor),
        fields(user_id = %actor.user_id, license_id = %id),
        err
    )]
    async fn revoke(&self, actor: Actor, id: LicenseId) -> Result<License, ServiceError> {
        let mut tx = self.store.begin().await?;

        let mut license = self.licenses.get(tx.as_mut(), &id).await?;

        license.revoke(&actor)?;

        self.licenses.save(tx.as_mut(), &license).await?;

        tx.commit().await?;

        info!(license_id = %id, "revoked license");

        Ok(license)
    }
}

#[automock]
#[async_trait]
pub trait LicensesService: Send + Sync {
    /// Approved registrations with a paid payment and no license yet.
    async fn eligible(&self, actor: Actor) -> Result<Vec<Registration>, ServiceError>;

    /// Issue the license for an eligible registration.
    async fn issue(
        &self,
        actor: Actor,
        registration_id: RegistrationId,
    ) -> Result<License, ServiceError>;

    /// Retrieve a single license.
    async fn get(&self, actor: Actor, id: LicenseId) -> Result<License, ServiceError>;

    /// List licenses; fisherfolk only ever see their own.
    async fn list(&self, actor: Actor, query: LicensesQuery) -> Result<Vec<License>, ServiceError>;

    /// Revoke an active license.
    async fn revoke(&self, actor: Actor, id: LicenseId) -> Result<License, ServiceError>;
}
