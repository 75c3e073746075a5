//! Payments Service

use std::sync::Arc;

use async_trait::async_trait;
use fishery::{
    actors::{Actor, Role},
    errors::WorkflowError,
    ids::PaymentId,
    notifications::Notification,
    payments::{NewPayment, Payment, ReceiptUpload, RejectionReason, TreasurySubmission},
};
use mockall::automock;
use tracing::{Span, info};

use crate::{
    clock::Clock,
    domain::{
        errors::ServiceError,
        notifications::repository::NotificationsRepository,
        payments::{data::PaymentsQuery, repository::PaymentsRepository},
        registrations::repository::RegistrationsRepository,
    },
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct StorePaymentsService {
    store: Arc<dyn DocumentStore>,
    clock: Clock,
    payments: PaymentsRepository,
    registrations: RegistrationsRepository,
    notifications: NotificationsRepository,
}

impl StorePaymentsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        Self {
            store,
            clock,
            payments: PaymentsRepository::new(),
            registrations: RegistrationsRepository::new(),
            notifications: NotificationsRepository::new(),
        }
    }

    /// Load, change and save a payment in one transaction, optionally recording a
    /// notification alongside it.
    async fn transition<F>(&self, id: &PaymentId, apply: F) -> Result<Payment, ServiceError>
    where
        F: FnOnce(&mut Payment) -> Result<Option<Notification>, WorkflowError> + Send,
    {
        let mut tx = self.store.begin().await?;

        let mut payment = self.payments.get(tx.as_mut(), id).await?;

        let notification = apply(&mut payment)?;

        self.payments.save(tx.as_mut(), &payment).await?;

        if let Some(notification) = &notification {
            self.notifications.create(tx.as_mut(), notification).await?;
        }

        tx.commit().await?;

        Ok(payment)
    }
}

#[async_trait]
impl PaymentsService for StorePaymentsService {
    #[tracing::instrument(
        name = "payments.service.create",
        skip(self, actor, request),
        fields(
            user_id = %actor.user_id,
            registration_id = %request.registration_id,
            payment_id = tracing::field::Empty
        ),
        err
    )]
    async fn create(&self, actor: Actor, request: NewPayment) -> Result<Payment, ServiceError> {
        let mut tx = self.store.begin().await?;

        let registration = self
            .registrations
            .get(tx.as_mut(), &request.registration_id)
            .await?;

        let existing = self
            .payments
            .for_registration(tx.as_mut(), &registration.id, None)
            .await?;

        if let Some(payment) = existing.first() {
            return Err(ServiceError::AlreadyExists {
                collection: "payments",
                id: payment.id.to_string(),
            });
        }

        let payment = Payment::open(
            PaymentId::generate(),
            request,
            &registration,
            &actor,
            self.clock.now(),
            self.clock.today(),
        )?;

        self.payments.create(tx.as_mut(), &payment).await?;

        tx.commit().await?;

        Span::current().record("payment_id", tracing::field::display(&payment.id));

        info!(payment_id = %payment.id, "opened payment");

        Ok(payment)
    }

    #[tracing::instrument(
        name = "payments.service.get",
        skip(self, actor),
        fields(user_id = %actor.user_id, payment_id = %id),
        err
    )]
    async fn get(&self, actor: Actor, id: PaymentId) -> Result<Payment, ServiceError> {
        let mut tx = self.store.begin().await?;

        let payment = self.payments.get(tx.as_mut(), &id).await?;

        tx.commit().await?;

        actor.require_viewer(&payment.payer_id, "view a payment")?;

        Ok(payment)
    }

    #[tracing::instrument(
        name = "payments.service.list",
        skip(self, actor),
        fields(user_id = %actor.user_id),
        err
    )]
    async fn list(&self, actor: Actor, query: PaymentsQuery) -> Result<Vec<Payment>, ServiceError> {
        let query = match actor.role {
            Role::Fisherfolk => PaymentsQuery {
                payer: Some(actor.user_id),
                ..query
            },
            _ => query,
        };

        let mut tx = self.store.begin().await?;

        let payments = self.payments.list(tx.as_mut(), &query).await?;

        tx.commit().await?;

        Ok(payments)
    }

    #[tracing::instrument(
        name = "payments.service.upload_receipt",
        skip(self, actor, upload),
        fields(user_id = %actor.user_id, payment_id = %id),
        err
    )]
    async fn upload_receipt(
        &self,
        actor: Actor,
        id: PaymentId,
        upload: ReceiptUpload,
    ) -> Result<Payment, ServiceError> {
        let now = self.clock.now();

        let payment = self
            .transition(&id, |payment| {
                payment.upload_receipt(upload, &actor, now).map(|()| None)
            })
            .await?;

        info!(payment_id = %id, "uploaded receipt");

        Ok(payment)
    }

    #[tracing::instrument(
        name = "payments.service.treasury_submit",
        skip(self, actor, submission),
        fields(user_id = %actor.user_id, payment_id = %id),
        err
    )]
    async fn treasury_submit(
        &self,
        actor: Actor,
        id: PaymentId,
        submission: TreasurySubmission,
    ) -> Result<Payment, ServiceError> {
        let now = self.clock.now();

        let payment = self
            .transition(&id, |payment| {
                payment
                    .treasury_submit(submission, &actor, now)
                    .map(|()| None)
            })
            .await?;

        info!(payment_id = %id, "treasury certified payment");

        Ok(payment)
    }

    #[tracing::instrument(
        name = "payments.service.verify",
        skip(self, actor),
        fields(user_id = %actor.user_id, payment_id = %id),
        err
    )]
    async fn verify(&self, actor: Actor, id: PaymentId) -> Result<Payment, ServiceError> {
        let now = self.clock.now();
        let today = self.clock.today();

        let payment = self
            .transition(&id, |payment| {
                payment.verify(&actor, now, today)?;

                Ok(Some(Notification::payment_verified(payment, now)))
            })
            .await?;

        info!(payment_id = %id, "verified payment");

        Ok(payment)
    }

    #[tracing::instrument(
        name = "payments.service.reject",
        skip(self, actor),
        fields(user_id = %actor.user_id, payment_id = %id, reason = ?reason),
        err
    )]
    async fn reject(
        &self,
        actor: Actor,
        id: PaymentId,
        reason: RejectionReason,
    ) -> Result<Payment, ServiceError> {
        let now = self.clock.now();

        let payment = self
            .transition(&id, |payment| {
                payment.reject(reason, &actor, now)?;

                Ok(Some(Notification::payment_rejected(payment, reason, now)))
            })
            .await?;

        info!(payment_id = %id, "rejected payment");

        Ok(payment)
    }

    #[tracing::instrument(
        name = "payments.service.reopen",
        skip(self, actor),
        fields(user_id = %actor.user_id, payment_id = %id),
        err
    )]
    async fn reopen(&self, actor: Actor, id: PaymentId) -> Result<Payment, ServiceError> {
        let now = self.clock.now();

        let payment = self
            .transition(&id, |payment| payment.reopen(&actor, now).map(|()| None))
            .await?;

        info!(payment_id = %id, "reopened payment");

        Ok(payment)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Open a payment against an approved registration.
    async fn create(&self, actor: Actor, request: NewPayment) -> Result<Payment, ServiceError>;

    /// Retrieve a single payment.
    async fn get(&self, actor: Actor, id: PaymentId) -> Result<Payment, ServiceError>;

    /// List payments; fisherfolk only ever see their own.
    async fn list(&self, actor: Actor, query: PaymentsQuery) -> Result<Vec<Payment>, ServiceError>;

    /// Attach the payer's receipt and OR number.
    async fn upload_receipt(
        &self,
        actor: Actor,
        id: PaymentId,
        upload: ReceiptUpload,
    ) -> Result<Payment, ServiceError>;

    /// Treasury certification.
    async fn treasury_submit(
        &self,
        actor: Actor,
        id: PaymentId,
        submission: TreasurySubmission,
    ) -> Result<Payment, ServiceError>;

    /// MAO confirmation; notifies the payer.
    async fn verify(&self, actor: Actor, id: PaymentId) -> Result<Payment, ServiceError>;

    /// MAO rejection; notifies the payer.
    async fn reject(
        &self,
        actor: Actor,
        id: PaymentId,
        reason: RejectionReason,
    ) -> Result<Payment, ServiceError>;

    /// Send a settled payment back to `Pending`.
    async fn reopen(&self, actor: Actor, id: PaymentId) -> Result<Payment, ServiceError>;
}
