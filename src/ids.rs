//! Typed Identifiers
//!
//! Every document in the portal is keyed by an opaque string. The phantom type keeps a
//! payment transaction ID from being handed to something that expects a registration.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{
    licenses::License, notifications::Notification, payments::Payment,
    registrations::{Registration, RegistrationType},
};

/// String identifier tagged with the record type it refers to.
pub struct TypedId<T>(String, PhantomData<fn() -> T>);

impl<T> TypedId<T> {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the raw identifier.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Borrow<str> for TypedId<T> {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<T> From<String> for TypedId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<TypedId<T>> for String {
    fn from(value: TypedId<T>) -> Self {
        value.0
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Authenticated user, as issued by the external identity provider.
#[derive(Debug)]
pub struct User;

/// Registration ID
pub type RegistrationId = TypedId<Registration>;

/// Payment transaction ID
pub type PaymentId = TypedId<Payment>;

/// License ID
pub type LicenseId = TypedId<License>;

/// Notification ID
pub type NotificationId = TypedId<Notification>;

/// Opaque user ID
pub type UserId = TypedId<User>;

/// Prefix used for renewal registrations.
pub const RENEWAL_PREFIX: &str = "REN";

impl RegistrationId {
    /// Build the ID of a fresh submission from its store-issued sequence number.
    #[must_use]
    pub fn for_submission(kind: RegistrationType, sequence: u64) -> Self {
        Self::new(format!("{}-{sequence}", kind.id_prefix()))
    }

    /// Build the ID of the `sequence`th renewal of `source`.
    #[must_use]
    pub fn for_renewal(source: &RegistrationId, sequence: u64) -> Self {
        Self::new(format!("{RENEWAL_PREFIX}-{source}-{sequence}"))
    }

    /// The store sequence key used to number submissions of the given type.
    #[must_use]
    pub fn submission_sequence_key(kind: RegistrationType) -> String {
        format!("registrations:{}", kind.id_prefix())
    }

    /// The store sequence key used to number renewals of this registration.
    #[must_use]
    pub fn renewal_sequence_key(&self) -> String {
        format!("renewals:{}", self.0)
    }
}

impl PaymentId {
    /// Generate a fresh transaction ID.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(format!("TXN-{}", Uuid::now_v7().simple()))
    }
}

impl LicenseId {
    /// Deterministic license ID for a registration type and its paying transaction.
    #[must_use]
    pub fn for_payment(kind: RegistrationType, payment: &PaymentId) -> Self {
        Self::new(format!("LIC-{}-{payment}", kind.license_code()))
    }
}

impl NotificationId {
    /// Generate a fresh notification ID.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7().to_string())
    }
}
