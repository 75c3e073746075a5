//! Typed reads and writes over raw documents.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::store::{Collection, Filter, StoreError, StoreTransaction, Subscription};

pub(crate) async fn get_as<T: DeserializeOwned>(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    id: &str,
) -> Result<Option<T>, StoreError> {
    tx.get(collection, id)
        .await?
        .map(serde_json::from_value)
        .transpose()
        .map_err(StoreError::from)
}

/// Like [`get_as`], failing with [`StoreError::NotFound`] when absent.
pub(crate) async fn require_as<T: DeserializeOwned>(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    id: &str,
) -> Result<T, StoreError> {
    get_as(tx, collection, id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection,
            id: id.to_string(),
        })
}

pub(crate) async fn query_as<T: DeserializeOwned>(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<T>, StoreError> {
    decode_all(tx.query(collection, filter).await?)
}

pub(crate) async fn scan_as<T: DeserializeOwned>(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<T>, StoreError> {
    decode_all(tx.scan(collection, filter).await?)
}

pub(crate) async fn create_as<T: Serialize + Sync>(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    id: &str,
    document: &T,
) -> Result<(), StoreError> {
    tx.create(collection, id, serde_json::to_value(document)?)
        .await
}

/// Write every field of `document` over the stored one.
pub(crate) async fn save_as<T: Serialize + Sync>(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    id: &str,
    document: &T,
) -> Result<(), StoreError> {
    tx.update(collection, id, serde_json::to_value(document)?)
        .await
}

pub(crate) async fn next_snapshot_as<T: DeserializeOwned>(
    subscription: &mut dyn Subscription,
) -> Result<Vec<T>, StoreError> {
    decode_all(subscription.next_snapshot().await?)
}

fn decode_all<T: DeserializeOwned>(documents: Vec<Value>) -> Result<Vec<T>, StoreError> {
    documents
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<_, _>>()
        .map_err(StoreError::from)
}
