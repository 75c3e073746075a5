//! Registrations Service

use std::sync::Arc;

use async_trait::async_trait;
use fishery::{
    actors::{Actor, Role, SWEEPERS},
    errors::WorkflowError,
    ids::RegistrationId,
    registrations::{
        Registration, RegistrationDetails, RegistrationStatus, RegistrationType,
        RegistrationUpdate, ReviewDecision,
    },
};
use jiff::civil::Date;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    clock::Clock,
    domain::{
        errors::ServiceError,
        registrations::{data::RegistrationsQuery, repository::RegistrationsRepository},
        verification::repository::VerificationRepository,
    },
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct StoreRegistrationsService {
    store: Arc<dyn DocumentStore>,
    clock: Clock,
    registrations: RegistrationsRepository,
    verification: VerificationRepository,
}

impl StoreRegistrationsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        Self {
            store,
            clock,
            registrations: RegistrationsRepository::new(),
            verification: VerificationRepository::new(),
        }
    }

    async fn transition<F>(
        &self,
        id: &RegistrationId,
        apply: F,
    ) -> Result<Registration, ServiceError>
    where
        F: FnOnce(&mut Registration) -> Result<(), WorkflowError> + Send,
    {
        let mut tx = self.store.begin().await?;

        let mut registration = self.registrations.get(tx.as_mut(), id).await?;

        apply(&mut registration)?;

        self.registrations.save(tx.as_mut(), &registration).await?;

        tx.commit().await?;

        Ok(registration)
    }
}

#[async_trait]
impl RegistrationsService for StoreRegistrationsService {
    #[tracing::instrument(
        name = "registrations.service.submit",
        skip(self, actor, details),
        fields(
            user_id = %actor.user_id,
            kind = %kind,
            registration_id = tracing::field::Empty
        ),
        err
    )]
    async fn submit(
        &self,
        actor: Actor,
        kind: RegistrationType,
        details: RegistrationDetails,
    ) -> Result<Registration, ServiceError> {
        let mut tx = self.store.begin().await?;

        // Reading the owner's verification record locks it, so one owner's submissions
        // run one at a time and the pending check below cannot race.
        let flags = self
            .verification
            .find(tx.as_mut(), &actor.user_id)
            .await?
            .map(|submission| submission.flags())
            .unwrap_or_default();

        let sequence = tx
            .next_sequence(&RegistrationId::submission_sequence_key(kind))
            .await?;

        let registration = Registration::submit(
            RegistrationId::for_submission(kind, sequence),
            kind,
            details,
            flags,
            &actor,
            self.clock.now(),
            self.clock.today(),
        )?;

        let pending = self
            .registrations
            .pending_for(tx.as_mut(), &actor.user_id, kind)
            .await?;

        if !pending.is_empty() {
            return Err(WorkflowError::DuplicateSubmission {
                owner: actor.user_id.to_string(),
                kind,
            }
            .into());
        }

        self.registrations.create(tx.as_mut(), &registration).await?;

        tx.commit().await?;

        Span::current().record(
            "registration_id",
            tracing::field::display(&registration.id),
        );

        info!(registration_id = %registration.id, "submitted registration");

        Ok(registration)
    }

    #[tracing::instrument(
        name = "registrations.service.get",
        skip(self, actor),
        fields(user_id = %actor.user_id, registration_id = %id),
        err
    )]
    async fn get(&self, actor: Actor, id: RegistrationId) -> Result<Registration, ServiceError> {
        let mut tx = self.store.begin().await?;

        let registration = self.registrations.get(tx.as_mut(), &id).await?;

        tx.commit().await?;

        actor.require_viewer(&registration.owner.id, "view a registration")?;

        Ok(registration)
    }

    #[tracing::instrument(
        name = "registrations.service.list",
        skip(self, actor),
        fields(user_id = %actor.user_id),
        err
    )]
    async fn list(
        &self,
        actor: Actor,
        query: RegistrationsQuery,
    ) -> Result<Vec<Registration>, ServiceError> {
        let query = match actor.role {
            Role::Fisherfolk => RegistrationsQuery {
                owner: Some(actor.user_id),
                ..query
            },
            _ => query,
        };

        let mut tx = self.store.begin().await?;

        let registrations = self.registrations.list(tx.as_mut(), &query).await?;

        tx.commit().await?;

        Ok(registrations)
    }

    #[tracing::instrument(
        name = "registrations.service.review",
        skip(self, actor, remarks),
        fields(user_id = %actor.user_id, registration_id = %id, decision = ?decision),
        err
    )]
    async fn review(
        &self,
        actor: Actor,
        id: RegistrationId,
        decision: ReviewDecision,
        remarks: Option<String>,
    ) -> Result<Registration, ServiceError> {
        let now = self.clock.now();

        let registration = self
            .transition(&id, |registration| {
                registration.review(decision, remarks, &actor, now)
            })
            .await?;

        info!(registration_id = %id, status = %registration.status, "reviewed registration");

        Ok(registration)
    }

    #[tracing::instrument(
        name = "registrations.service.update_details",
        skip(self, actor, update),
        fields(user_id = %actor.user_id, registration_id = %id),
        err
    )]
    async fn update_details(
        &self,
        actor: Actor,
        id: RegistrationId,
        update: RegistrationUpdate,
    ) -> Result<Registration, ServiceError> {
        let now = self.clock.now();

        let registration = self
            .transition(&id, |registration| {
                registration.update_details(update, &actor, now)
            })
            .await?;

        info!(registration_id = %id, "updated registration details");

        Ok(registration)
    }

    #[tracing::instrument(
        name = "registrations.service.renew",
        skip(self, actor, update),
        fields(
            user_id = %actor.user_id,
            source_id = %id,
            registration_id = tracing::field::Empty
        ),
        err
    )]
    async fn renew(
        &self,
        actor: Actor,
        id: RegistrationId,
        update: RegistrationUpdate,
    ) -> Result<Registration, ServiceError> {
        let mut tx = self.store.begin().await?;

        let source = self.registrations.get(tx.as_mut(), &id).await?;

        let sequence = tx.next_sequence(&source.id.renewal_sequence_key()).await?;

        let renewal = source.renew(
            RegistrationId::for_renewal(&source.id, sequence),
            update,
            &actor,
            self.clock.now(),
            self.clock.today(),
        )?;

        self.registrations.create(tx.as_mut(), &renewal).await?;

        tx.commit().await?;

        Span::current().record("registration_id", tracing::field::display(&renewal.id));

        info!(registration_id = %renewal.id, source_id = %id, "submitted renewal");

        Ok(renewal)
    }

    #[tracing::instrument(
        name = "registrations.service.mark_expired",
        skip(self, actor),
        fields(user_id = %actor.user_id, registration_id = %id),
        err
    )]
    async fn mark_expired(
        &self,
        actor: Actor,
        id: RegistrationId,
    ) -> Result<Registration, ServiceError> {
        let now = self.clock.now();

        let registration = self
            .transition(&id, |registration| registration.mark_expired(&actor, now))
            .await?;

        info!(registration_id = %id, "expired registration");

        Ok(registration)
    }

    #[tracing::instrument(
        name = "registrations.service.expire_due",
        skip(self, actor),
        fields(user_id = %actor.user_id, today = %today, expired = tracing::field::Empty),
        err
    )]
    async fn expire_due(
        &self,
        actor: Actor,
        today: Date,
    ) -> Result<Vec<RegistrationId>, ServiceError> {
        actor.require(SWEEPERS, "run the expiry sweep")?;

        let mut tx = self.store.begin().await?;

        let approved = self
            .registrations
            .list_for_update(
                tx.as_mut(),
                &RegistrationsQuery {
                    status: Some(RegistrationStatus::Approved),
                    ..RegistrationsQuery::default()
                },
            )
            .await?;

        let now = self.clock.now();
        let mut expired = Vec::new();

        for mut registration in approved {
            if !registration.is_due_for_expiry(today) {
                continue;
            }

            registration.mark_expired(&actor, now)?;

            self.registrations.save(tx.as_mut(), &registration).await?;

            expired.push(registration.id);
        }

        tx.commit().await?;

        Span::current().record("expired", expired.len());

        info!(count = expired.len(), %today, "expired due registrations");

        Ok(expired)
    }
}

#[automock]
#[async_trait]
pub trait RegistrationsService: Send + Sync {
    /// Submit a new registration for the calling fisherfolk.
    async fn submit(
        &self,
        actor: Actor,
        kind: RegistrationType,
        details: RegistrationDetails,
    ) -> Result<Registration, ServiceError>;

    /// Retrieve a single registration.
    async fn get(&self, actor: Actor, id: RegistrationId) -> Result<Registration, ServiceError>;

    /// List registrations; fisherfolk only ever see their own.
    async fn list(
        &self,
        actor: Actor,
        query: RegistrationsQuery,
    ) -> Result<Vec<Registration>, ServiceError>;

    /// Approve or reject a pending registration.
    async fn review(
        &self,
        actor: Actor,
        id: RegistrationId,
        decision: ReviewDecision,
        remarks: Option<String>,
    ) -> Result<Registration, ServiceError>;

    /// Edit a pending registration.
    async fn update_details(
        &self,
        actor: Actor,
        id: RegistrationId,
        update: RegistrationUpdate,
    ) -> Result<Registration, ServiceError>;

    /// Clone an approved or expired registration into a new pending renewal.
    async fn renew(
        &self,
        actor: Actor,
        id: RegistrationId,
        update: RegistrationUpdate,
    ) -> Result<Registration, ServiceError>;

    /// Flag an approved registration as expired.
    async fn mark_expired(
        &self,
        actor: Actor,
        id: RegistrationId,
    ) -> Result<Registration, ServiceError>;

    /// Expire every approved registration whose expiry date is before `today`.
    async fn expire_due(
        &self,
        actor: Actor,
        today: Date,
    ) -> Result<Vec<RegistrationId>, ServiceError>;
}
