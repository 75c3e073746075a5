//! Test helpers.

use std::sync::Arc;

use fishery::{
    actors::{Actor, Role},
    history::HistoryEntry,
    ids::{LicenseId, NotificationId, PaymentId, RegistrationId, UserId},
    licenses::{License, LicenseStatus},
    notifications::Notification,
    payments::{MtoVerifiedStatus, Payment, PaymentStatus},
    registrations::{Owner, Registration, RegistrationStatus, RegistrationType},
    verification::{FlagStatus, VerificationSubmission},
};
use fishery_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        licenses::MockLicensesService, notifications::MockNotificationsService,
        payments::MockPaymentsService, registrations::MockRegistrationsService,
        verification::{MockVerificationService, data::VerificationView},
    },
    store::MemoryStore,
};
use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) fn test_actor() -> Actor {
    Actor {
        user_id: UserId::new("owner-1"),
        name: "Maria Santos".to_string(),
        email: "owner-1@example.com".to_string(),
        role: Role::Fisherfolk,
    }
}

#[salvo::handler]
pub(crate) async fn inject_actor(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(test_actor());
    ctrl.call_next(req, depot, res).await;
}

fn strict_registrations_mock() -> MockRegistrationsService {
    let mut registrations = MockRegistrationsService::new();

    registrations.expect_submit().never();
    registrations.expect_get().never();
    registrations.expect_list().never();
    registrations.expect_review().never();
    registrations.expect_update_details().never();
    registrations.expect_renew().never();
    registrations.expect_mark_expired().never();
    registrations.expect_expire_due().never();

    registrations
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_create().never();
    payments.expect_get().never();
    payments.expect_list().never();
    payments.expect_upload_receipt().never();
    payments.expect_treasury_submit().never();
    payments.expect_verify().never();
    payments.expect_reject().never();
    payments.expect_reopen().never();

    payments
}

fn strict_licenses_mock() -> MockLicensesService {
    let mut licenses = MockLicensesService::new();

    licenses.expect_eligible().never();
    licenses.expect_issue().never();
    licenses.expect_get().never();
    licenses.expect_list().never();
    licenses.expect_revoke().never();

    licenses
}

fn strict_verification_mock() -> MockVerificationService {
    let mut verification = MockVerificationService::new();

    verification.expect_open().never();
    verification.expect_get().never();
    verification.expect_list().never();
    verification.expect_set_flag().never();

    verification
}

fn strict_notifications_mock() -> MockNotificationsService {
    let mut notifications = MockNotificationsService::new();

    notifications.expect_list().never();
    notifications.expect_mark_read().never();

    notifications
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_app() -> AppContext {
    AppContext {
        store: Arc::new(MemoryStore::new()),
        registrations: Arc::new(strict_registrations_mock()),
        payments: Arc::new(strict_payments_mock()),
        licenses: Arc::new(strict_licenses_mock()),
        verification: Arc::new(strict_verification_mock()),
        notifications: Arc::new(strict_notifications_mock()),
        auth: Arc::new(strict_auth_mock()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_app()
    })
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_actor)
            .push(route),
    )
}

pub(crate) fn registrations_service(registrations: MockRegistrationsService, route: Router) -> Service {
    service(
        AppContext {
            registrations: Arc::new(registrations),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    service(
        AppContext {
            payments: Arc::new(payments),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn licenses_service(licenses: MockLicensesService, route: Router) -> Service {
    service(
        AppContext {
            licenses: Arc::new(licenses),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn verification_service(verification: MockVerificationService, route: Router) -> Service {
    service(
        AppContext {
            verification: Arc::new(verification),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn notifications_service(
    notifications: MockNotificationsService,
    route: Router,
) -> Service {
    service(
        AppContext {
            notifications: Arc::new(notifications),
            ..strict_app()
        },
        route,
    )
}

fn owner() -> Owner {
    let actor = test_actor();

    Owner {
        id: actor.user_id,
        name: actor.name,
        email: actor.email,
        contact: "0917 555 0101".to_string(),
        address: "Brgy. Poblacion".to_string(),
    }
}

fn history(action: &str) -> Vec<HistoryEntry> {
    vec![HistoryEntry::new(action, &test_actor(), Timestamp::UNIX_EPOCH)]
}

pub(crate) fn make_registration(id: &str, status: RegistrationStatus) -> Registration {
    Registration {
        id: RegistrationId::new(id),
        owner: owner(),
        kind: RegistrationType::Vessel,
        details: "name: Bangka Uno; length: 8m".to_string(),
        profile: "municipal fisher".to_string(),
        registration_date: date(2026, 3, 2),
        expiry_date: date(2027, 3, 2),
        status,
        boatr_verified: true,
        fishr_verified: true,
        history: history("Submitted"),
        renewal_for: None,
        photos: vec![],
    }
}

pub(crate) fn make_payment(id: &str, status: PaymentStatus) -> Payment {
    Payment {
        id: PaymentId::new(id),
        registration_id: RegistrationId::new("VES-1"),
        payer_id: test_actor().user_id,
        payer_name: test_actor().name,
        amount: 150_000,
        payment_method: "Over the counter".to_string(),
        date: date(2026, 3, 2),
        status,
        reference_number: None,
        uploaded_or_number: None,
        uploaded_receipt_url: None,
        mto_verified_status: MtoVerifiedStatus::Unverified,
        history: history("Created"),
    }
}

pub(crate) fn make_license(id: &str, status: LicenseStatus) -> License {
    License {
        id: LicenseId::new(id),
        registration_id: RegistrationId::new("VES-1"),
        payment_id: PaymentId::new("TXN-1"),
        owner: owner(),
        kind: RegistrationType::Vessel,
        status,
        issue_date: date(2026, 3, 2),
        expiry_date: date(2026, 12, 31),
        issued_by: "MAO Officer".to_string(),
        issued_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_notification(id: &str, read: bool) -> Notification {
    Notification {
        id: NotificationId::new(id),
        recipient_id: test_actor().user_id,
        title: "Payment verified".to_string(),
        message: "Your payment has been verified.".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        read,
        payment_id: Some(PaymentId::new("TXN-1")),
    }
}

pub(crate) fn make_verification(fishr: FlagStatus, boatr: FlagStatus) -> VerificationView {
    VerificationView::from(VerificationSubmission {
        owner_id: test_actor().user_id,
        owner_name: test_actor().name,
        fishr_status: fishr,
        boatr_status: boatr,
        submitted_at: Timestamp::UNIX_EPOCH,
        history: history("Opened"),
    })
}
