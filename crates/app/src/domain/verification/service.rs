//! Verification Service

use std::sync::Arc;

use async_trait::async_trait;
use fishery::{
    actors::{Actor, Role},
    errors::WorkflowError,
    ids::UserId,
    verification::{FlagStatus, Registry, VerificationSubmission},
};
use mockall::automock;
use tracing::info;

use crate::{
    clock::Clock,
    domain::{
        errors::ServiceError,
        registrations::repository::RegistrationsRepository,
        verification::{data::VerificationView, repository::VerificationRepository},
    },
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct StoreVerificationService {
    store: Arc<dyn DocumentStore>,
    clock: Clock,
    submissions: VerificationRepository,
    registrations: RegistrationsRepository,
}

impl StoreVerificationService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Clock) -> Self {
        Self {
            store,
            clock,
            submissions: VerificationRepository::new(),
            registrations: RegistrationsRepository::new(),
        }
    }
}

#[async_trait]
impl VerificationService for StoreVerificationService {
    #[tracing::instrument(
        name = "verification.service.open",
        skip(self, actor),
        fields(user_id = %actor.user_id),
        err
    )]
    async fn open(&self, actor: Actor) -> Result<VerificationView, ServiceError> {
        let submission = VerificationSubmission::open(&actor, self.clock.now())?;

        let mut tx = self.store.begin().await?;

        self.submissions.create(tx.as_mut(), &submission).await?;

        tx.commit().await?;

        info!(owner_id = %submission.owner_id, "opened verification submission");

        Ok(submission.into())
    }

    #[tracing::instrument(
        name = "verification.service.get",
        skip(self, actor),
        fields(user_id = %actor.user_id, owner_id = %owner),
        err
    )]
    async fn get(&self, actor: Actor, owner: UserId) -> Result<VerificationView, ServiceError> {
        actor.require_viewer(&owner, "view a verification submission")?;

        let mut tx = self.store.begin().await?;

        let submission = self
            .submissions
            .find(tx.as_mut(), &owner)
            .await?
            .ok_or_else(|| WorkflowError::not_found("verificationSubmissions", owner.as_str()))?;

        tx.commit().await?;

        Ok(submission.into())
    }

    #[tracing::instrument(
        name = "verification.service.list",
        skip(self, actor),
        fields(user_id = %actor.user_id),
        err
    )]
    async fn list(&self, actor: Actor) -> Result<Vec<VerificationView>, ServiceError> {
        actor.require(&[Role::Mao, Role::Inspector], "list verification submissions")?;

        let mut tx = self.store.begin().await?;

        let submissions = self.submissions.list(tx.as_mut()).await?;

        tx.commit().await?;

        Ok(submissions.into_iter().map(VerificationView::from).collect())
    }

    #[tracing::instrument(
        name = "verification.service.set_flag",
        skip(self, actor),
        fields(
            user_id = %actor.user_id,
            owner_id = %owner,
            registry = %registry,
            status = %status
        ),
        err
    )]
    async fn set_flag(
        &self,
        actor: Actor,
        owner: UserId,
        registry: Registry,
        status: FlagStatus,
    ) -> Result<VerificationView, ServiceError> {
        let mut tx = self.store.begin().await?;

        let mut submission = self
            .submissions
            .find(tx.as_mut(), &owner)
            .await?
            .ok_or_else(|| WorkflowError::not_found("verificationSubmissions", owner.as_str()))?;

        submission.set_flag(registry, status, &actor, self.clock.now())?;

        self.submissions.save(tx.as_mut(), &submission).await?;

        let projected = self
            .registrations
            .project_flags(tx.as_mut(), &owner, submission.flags())
            .await?;

        tx.commit().await?;

        info!(
            owner_id = %owner,
            registrations = projected.len(),
            "updated verification flag"
        );

        Ok(submission.into())
    }
}

#[automock]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Open the calling fisherfolk's submission with both registries pending.
    async fn open(&self, actor: Actor) -> Result<VerificationView, ServiceError>;

    /// Retrieve an owner's submission.
    async fn get(&self, actor: Actor, owner: UserId) -> Result<VerificationView, ServiceError>;

    /// Every submission, for staff review.
    async fn list(&self, actor: Actor) -> Result<Vec<VerificationView>, ServiceError>;

    /// Set one registry's status and rewrite the projection on the owner's registrations.
    async fn set_flag(
        &self,
        actor: Actor,
        owner: UserId,
        registry: Registry,
        status: FlagStatus,
    ) -> Result<VerificationView, ServiceError>;
}

#[cfg(test)]
mod tests {
    use fishery::registrations::RegistrationType;
    use testresult::TestResult;

    use crate::{
        domain::registrations::RegistrationsService,
        test::{TestContext, details, mao, other_owner, owner},
    };

    use super::*;

    #[tokio::test]
    async fn open_starts_pending() -> TestResult {
        let ctx = TestContext::new();

        let view = ctx.verification.open(owner()).await?;

        assert_eq!(view.submission.fishr_status, FlagStatus::Pending);
        assert_eq!(view.submission.boatr_status, FlagStatus::Pending);
        assert_eq!(view.overall_status, FlagStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn open_twice_conflicts() -> TestResult {
        let ctx = TestContext::new();

        ctx.verification.open(owner()).await?;

        let again = ctx.verification.open(owner()).await;

        assert!(
            matches!(again, Err(ServiceError::AlreadyExists { .. })),
            "expected conflict, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn overall_status_follows_both_flags() -> TestResult {
        let ctx = TestContext::new();

        ctx.verification.open(owner()).await?;

        let view = ctx
            .verification
            .set_flag(mao(), owner().user_id, Registry::FishR, FlagStatus::Approved)
            .await?;

        assert_eq!(view.overall_status, FlagStatus::Pending);

        let view = ctx
            .verification
            .set_flag(mao(), owner().user_id, Registry::BoatR, FlagStatus::Rejected)
            .await?;

        assert_eq!(view.overall_status, FlagStatus::Rejected);

        let view = ctx
            .verification
            .set_flag(mao(), owner().user_id, Registry::BoatR, FlagStatus::Approved)
            .await?;

        assert_eq!(view.overall_status, FlagStatus::Approved);

        Ok(())
    }

    #[tokio::test]
    async fn set_flag_rewrites_registration_projection() -> TestResult {
        let ctx = TestContext::new();
        let registration = ctx.pending_registration().await?;

        assert!(
            registration.boatr_verified && registration.fishr_verified,
            "owner was verified before submitting"
        );

        ctx.verification
            .set_flag(mao(), owner().user_id, Registry::BoatR, FlagStatus::Rejected)
            .await?;

        let stored = ctx.registrations.get(mao(), registration.id).await?;

        assert!(!stored.boatr_verified, "boatr flag should be cleared");
        assert!(stored.fishr_verified, "fishr flag is untouched");

        Ok(())
    }

    #[tokio::test]
    async fn submit_is_blocked_until_both_flags_approve() -> TestResult {
        let ctx = TestContext::new();

        ctx.verification.open(owner()).await?;
        ctx.verification
            .set_flag(mao(), owner().user_id, Registry::FishR, FlagStatus::Approved)
            .await?;

        let blocked = ctx
            .registrations
            .submit(owner(), RegistrationType::Gear, details())
            .await;

        assert!(blocked.is_err(), "boatr is still pending");

        ctx.verification
            .set_flag(mao(), owner().user_id, Registry::BoatR, FlagStatus::Approved)
            .await?;

        ctx.registrations
            .submit(owner(), RegistrationType::Gear, details())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn only_the_owner_or_staff_can_read() -> TestResult {
        let ctx = TestContext::new();

        ctx.verification.open(owner()).await?;

        ctx.verification.get(owner(), owner().user_id).await?;
        ctx.verification.get(mao(), owner().user_id).await?;

        let peek = ctx.verification.get(other_owner(), owner().user_id).await;

        assert!(
            matches!(peek, Err(ServiceError::Workflow(WorkflowError::Forbidden { .. }))),
            "expected forbidden, got {peek:?}"
        );

        let listing = ctx.verification.list(owner()).await;

        assert!(listing.is_err(), "fisherfolk cannot list submissions");

        Ok(())
    }

    #[tokio::test]
    async fn flags_on_unknown_owner_are_not_found() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx
            .verification
            .set_flag(mao(), UserId::new("ghost"), Registry::FishR, FlagStatus::Approved)
            .await;

        assert!(
            matches!(result, Err(ServiceError::Workflow(WorkflowError::NotFound { .. }))),
            "expected not found, got {result:?}"
        );

        Ok(())
    }
}
