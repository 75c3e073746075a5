//! In-process document store.
//!
//! Transactions are serialized through a single async mutex. `begin` takes the lock and
//! stages a view that shares every collection with the committed data; a collection is
//! only copied the first time the transaction writes to it. `commit` swaps the staged
//! view in and bumps the revision of every collection it touched. Subscribers wait on
//! those revisions.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard, watch};

use crate::store::{
    Collection, DocumentStore, Filter, StoreError, StoreTransaction, Subscription, merge,
};

type Documents = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default)]
struct Data {
    documents: FxHashMap<Collection, Arc<Documents>>,
    sequences: Arc<FxHashMap<String, u64>>,
}

impl Data {
    fn snapshot(&self, collection: Collection, filter: &Filter) -> Vec<Value> {
        self.documents
            .get(&collection)
            .into_iter()
            .flat_map(|documents| documents.values())
            .filter(|document| filter.matches(document))
            .cloned()
            .collect()
    }
}

/// Document store held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: Arc<Mutex<Data>>,
    revisions: Arc<FxHashMap<Collection, watch::Sender<u64>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let revisions = Collection::ALL
            .into_iter()
            .map(|collection| (collection, watch::Sender::new(0)))
            .collect();

        Self {
            data: Arc::new(Mutex::new(Data::default())),
            revisions: Arc::new(revisions),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let guard = Arc::clone(&self.data).lock_owned().await;
        let staged = guard.clone();

        Ok(Box::new(MemoryTransaction {
            guard,
            staged,
            touched: FxHashSet::default(),
            revisions: Arc::clone(&self.revisions),
        }))
    }

    async fn subscribe(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Box<dyn Subscription>, StoreError> {
        let revision = self
            .revisions
            .get(&collection)
            .map(watch::Sender::subscribe)
            .ok_or(StoreError::Closed)?;

        Ok(Box::new(MemorySubscription {
            data: Arc::clone(&self.data),
            revision,
            collection,
            filter,
            primed: false,
            dirty: false,
        }))
    }
}

#[derive(Debug)]
struct MemoryTransaction {
    guard: OwnedMutexGuard<Data>,
    staged: Data,
    touched: FxHashSet<Collection>,
    revisions: Arc<FxHashMap<Collection, watch::Sender<u64>>>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn get(&mut self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .staged
            .documents
            .get(&collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn query(
        &mut self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        Ok(self.staged.snapshot(collection, filter))
    }

    async fn scan(
        &mut self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        Ok(self.staged.snapshot(collection, filter))
    }

    async fn create(
        &mut self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let documents = self.staged.documents.entry(collection).or_default();

        if documents.contains_key(id) {
            return Err(StoreError::Conflict {
                collection,
                id: id.to_string(),
            });
        }

        Arc::make_mut(documents).insert(id.to_string(), document);
        self.touched.insert(collection);

        Ok(())
    }

    async fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let document = self
            .staged
            .documents
            .get_mut(&collection)
            .filter(|documents| documents.contains_key(id))
            .and_then(|documents| Arc::make_mut(documents).get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;

        merge(document, patch)?;
        self.touched.insert(collection);

        Ok(())
    }

    async fn next_sequence(&mut self, key: &str) -> Result<u64, StoreError> {
        let value = Arc::make_mut(&mut self.staged.sequences)
            .entry(key.to_string())
            .or_default();

        *value += 1;

        Ok(*value)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let Self {
            mut guard,
            staged,
            touched,
            revisions,
        } = *self;

        *guard = staged;

        drop(guard);

        for collection in touched {
            if let Some(revision) = revisions.get(&collection) {
                revision.send_modify(|revision| *revision += 1);
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
struct MemorySubscription {
    data: Arc<Mutex<Data>>,
    revision: watch::Receiver<u64>,
    collection: Collection,
    filter: Filter,
    primed: bool,

    /// A change was seen but its snapshot has not been returned yet.
    dirty: bool,
}

#[async_trait]
impl Subscription for MemorySubscription {
    async fn next_snapshot(&mut self) -> Result<Vec<Value>, StoreError> {
        if !self.primed {
            self.revision.mark_unchanged();
        } else if !self.dirty {
            self.revision
                .changed()
                .await
                .map_err(|_closed| StoreError::Closed)?;

            self.dirty = true;
        }

        let snapshot = self.data.lock().await.snapshot(self.collection, &self.filter);

        self.primed = true;
        self.dirty = false;

        Ok(snapshot)
    }
}
