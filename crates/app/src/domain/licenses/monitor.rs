//! License eligibility monitor
//!
//! Keeps the set of registrations awaiting a license current by watching the three
//! collections it is computed from. Any committed change to approved registrations, paid
//! payments or licenses yields a freshly computed set.

use fishery::{
    licenses::{License, eligible_for_issuance},
    payments::{Payment, PaymentStatus},
    registrations::{Registration, RegistrationStatus},
};

use crate::{
    domain::errors::ServiceError,
    store::{Collection, DocumentStore, Filter, Subscription, next_snapshot_as},
};

/// Live view over the registrations eligible for issuance.
pub struct EligibilityMonitor {
    registrations: Box<dyn Subscription>,
    payments: Box<dyn Subscription>,
    licenses: Box<dyn Subscription>,
    snapshot: Option<Snapshot>,
}

#[derive(Debug, Default)]
struct Snapshot {
    registrations: Vec<Registration>,
    payments: Vec<Payment>,
    licenses: Vec<License>,
}

impl Snapshot {
    fn eligible(&self) -> Vec<Registration> {
        eligible_for_issuance(&self.registrations, &self.payments, &self.licenses)
            .into_iter()
            .cloned()
            .collect()
    }
}

enum Change {
    Registrations(Vec<Registration>),
    Payments(Vec<Payment>),
    Licenses(Vec<License>),
}

impl EligibilityMonitor {
    /// Subscribe to the underlying collections.
    ///
    /// # Errors
    ///
    /// Returns an error when any subscription cannot be opened.
    pub async fn start(store: &dyn DocumentStore) -> Result<Self, ServiceError> {
        let registrations = store
            .subscribe(
                Collection::Registrations,
                Filter::all().eq("status", RegistrationStatus::Approved.as_str()),
            )
            .await?;

        let payments = store
            .subscribe(
                Collection::Payments,
                Filter::all().eq("status", PaymentStatus::Paid.as_str()),
            )
            .await?;

        let licenses = store.subscribe(Collection::Licenses, Filter::all()).await?;

        Ok(Self {
            registrations,
            payments,
            licenses,
            snapshot: None,
        })
    }

    /// The first call returns the current eligible set. Later calls wait for the next
    /// change to any watched collection and return the recomputed set.
    ///
    /// # Errors
    ///
    /// Returns an error when a subscription fails or a document cannot be decoded.
    pub async fn next(&mut self) -> Result<Vec<Registration>, ServiceError> {
        let Some(snapshot) = self.snapshot.as_mut() else {
            let snapshot = Snapshot {
                registrations: next_snapshot_as(self.registrations.as_mut()).await?,
                payments: next_snapshot_as(self.payments.as_mut()).await?,
                licenses: next_snapshot_as(self.licenses.as_mut()).await?,
            };

            let eligible = snapshot.eligible();

            self.snapshot = Some(snapshot);

            return Ok(eligible);
        };

        let change = tokio::select! {
            registrations = next_snapshot_as(self.registrations.as_mut()) => {
                Change::Registrations(registrations?)
            }
            payments = next_snapshot_as(self.payments.as_mut()) => {
                Change::Payments(payments?)
            }
            licenses = next_snapshot_as(self.licenses.as_mut()) => {
                Change::Licenses(licenses?)
            }
        };

        match change {
            Change::Registrations(registrations) => snapshot.registrations = registrations,
            Change::Payments(payments) => snapshot.payments = payments,
            Change::Licenses(licenses) => snapshot.licenses = licenses,
        }

        Ok(snapshot.eligible())
    }
}

impl std::fmt::Debug for EligibilityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EligibilityMonitor")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
