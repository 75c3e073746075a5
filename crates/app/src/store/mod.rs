//! Document store
//!
//! Every record lives as a JSON document in a named collection. Services only ever talk
//! to the store through a [`StoreTransaction`]: reads inside a transaction see the
//! transaction's own writes, and nothing is visible to other readers or subscribers
//! until [`StoreTransaction::commit`]. Dropping a transaction without committing rolls
//! it back.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use async_trait::async_trait;
use serde_json::Value;

mod errors;
mod filter;
pub mod memory;
pub mod postgres;
mod typed;

pub use errors::StoreError;
pub use filter::Filter;
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub(crate) use typed::*;

/// Named document collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Registrations,
    Payments,
    Licenses,
    VerificationSubmissions,
    Notifications,
    Profiles,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Self; 6] = [
        Self::Registrations,
        Self::Payments,
        Self::Licenses,
        Self::VerificationSubmissions,
        Self::Notifications,
        Self::Profiles,
    ];

    /// Collection name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registrations => "registrations",
            Self::Payments => "payments",
            Self::Licenses => "licenses",
            Self::VerificationSubmissions => "verificationSubmissions",
            Self::Notifications => "notifications",
            Self::Profiles => "profiles",
        }
    }

    /// Look up a collection by its stored name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.as_str() == name)
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A backing store for documents.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Start a transaction.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;

    /// Watch the documents of `collection` matching `filter`.
    async fn subscribe(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Box<dyn Subscription>, StoreError>;
}

/// A unit of work against the store.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Read a document, locking it for the rest of the transaction.
    async fn get(&mut self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError>;

    /// All documents of `collection` matching `filter`, ordered by ID, each locked for
    /// the rest of the transaction.
    async fn query(
        &mut self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError>;

    /// Like [`StoreTransaction::query`], without taking any locks. For listings that
    /// never write back what they read.
    async fn scan(
        &mut self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError>;

    /// Insert a new document.
    ///
    /// Fails with [`StoreError::Conflict`] when the ID is taken.
    async fn create(
        &mut self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError>;

    /// Shallow-merge `patch` into an existing document: top-level fields in `patch`
    /// replace the stored ones, every other field is kept.
    ///
    /// Fails with [`StoreError::NotFound`] when there is no such document.
    async fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError>;

    /// Atomically increment the named counter and return its new value, starting at 1.
    async fn next_sequence(&mut self, key: &str) -> Result<u64, StoreError>;

    /// Make every write in this transaction visible.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Live view over a filtered collection.
#[async_trait]
pub trait Subscription: Send {
    /// The first call returns the current snapshot immediately. Every later call waits
    /// for the next committed change to the collection and returns the new snapshot.
    ///
    /// Cancel-safe: a change observed by a cancelled call is delivered by the next one.
    async fn next_snapshot(&mut self) -> Result<Vec<Value>, StoreError>;
}

/// Merge the top-level fields of `patch` into `document`.
pub(crate) fn merge(document: &mut Value, patch: Value) -> Result<(), StoreError> {
    let (Value::Object(target), Value::Object(fields)) = (document, patch) else {
        return Err(StoreError::NotAnObject);
    };

    target.extend(fields);

    Ok(())
}
