//! `PostgreSQL` document store
//!
//! Documents live in a single JSONB table keyed by `(collection, id)`. Reads inside a
//! transaction take row locks, so two services updating the same record serialize on it.
//! Every write raises a `pg_notify` on [`CHANGES_CHANNEL`] carrying the collection name;
//! Postgres only delivers it once the transaction commits.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{
    PgPool, Postgres, Transaction,
    postgres::PgListener,
    query, query_scalar,
    types::Json,
};

use crate::store::{Collection, DocumentStore, Filter, StoreError, StoreTransaction, Subscription};

/// Notification channel for committed writes.
pub const CHANGES_CHANNEL: &str = "fishery_documents";

const GET_DOCUMENT_SQL: &str = include_str!("sql/get_document.sql");
const QUERY_DOCUMENTS_SQL: &str = include_str!("sql/query_documents.sql");
const SNAPSHOT_DOCUMENTS_SQL: &str = include_str!("sql/snapshot_documents.sql");
const CREATE_DOCUMENT_SQL: &str = include_str!("sql/create_document.sql");
const UPDATE_DOCUMENT_SQL: &str = include_str!("sql/update_document.sql");
const NEXT_SEQUENCE_SQL: &str = include_str!("sql/next_sequence.sql");
const NOTIFY_CHANGE_SQL: &str = include_str!("sql/notify_change.sql");

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let tx = self.pool.begin().await?;

        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn subscribe(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Box<dyn Subscription>, StoreError> {
        let mut listener = PgListener::connect_with(&self.pool).await?;

        listener.listen(CHANGES_CHANNEL).await?;

        Ok(Box::new(PgSubscription {
            pool: self.pool.clone(),
            listener,
            collection,
            filter: filter.to_json(),
            primed: false,
            dirty: false,
        }))
    }
}

struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

impl PgStoreTransaction {
    async fn notify(&mut self, collection: Collection) -> Result<(), StoreError> {
        query(NOTIFY_CHANGE_SQL)
            .bind(collection.as_str())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn get(&mut self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        let body = query_scalar::<_, Json<Value>>(GET_DOCUMENT_SQL)
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(body.map(|Json(body)| body))
    }

    async fn query(
        &mut self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        let bodies = query_scalar::<_, Json<Value>>(QUERY_DOCUMENTS_SQL)
            .bind(collection.as_str())
            .bind(Json(filter.to_json()))
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(bodies.into_iter().map(|Json(body)| body).collect())
    }

    async fn scan(
        &mut self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        let bodies = query_scalar::<_, Json<Value>>(SNAPSHOT_DOCUMENTS_SQL)
            .bind(collection.as_str())
            .bind(Json(filter.to_json()))
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(bodies.into_iter().map(|Json(body)| body).collect())
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

        query(CREATE_DOCUMENT_SQL)
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(document))
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .execute(&mut *self.tx)
            .await
            .map_err(|error| StoreError::on_insert(error, collection, id))?;

        self.notify(collection).await
    }

    async fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        if !patch.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let result = query(UPDATE_DOCUMENT_SQL)
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(patch))
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }

        self.notify(collection).await
    }

    async fn next_sequence(&mut self, key: &str) -> Result<u64, StoreError> {
        let value = query_scalar::<_, i64>(NEXT_SEQUENCE_SQL)
            .bind(key)
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(u64::try_from(value)?)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(StoreError::from)
    }
}

struct PgSubscription {
    pool: PgPool,
    listener: PgListener,
    collection: Collection,
    filter: Value,
    primed: bool,
    dirty: bool,
}

#[async_trait]
impl Subscription for PgSubscription {
    async fn next_snapshot(&mut self) -> Result<Vec<Value>, StoreError> {
        if self.primed && !self.dirty {
            loop {
                let notification = self.listener.recv().await?;

                if notification.payload() == self.collection.as_str() {
                    break;
                }
            }

            self.dirty = true;
        }

        let bodies = query_scalar::<_, Json<Value>>(SNAPSHOT_DOCUMENTS_SQL)
            .bind(self.collection.as_str())
            .bind(Json(&self.filter))
            .fetch_all(&self.pool)
            .await?;

        self.primed = true;
        self.dirty = false;

        Ok(bodies.into_iter().map(|Json(body)| body).collect())
    }
}
