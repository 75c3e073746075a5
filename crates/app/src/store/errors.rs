//! Store errors.

use std::num::TryFromIntError;

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::store::Collection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} {id} not found")]
    NotFound { collection: Collection, id: String },

    #[error("{collection} {id} already exists")]
    Conflict { collection: Collection, id: String },

    #[error("documents and patches must be JSON objects")]
    NotAnObject,

    #[error("document could not be (de)serialized")]
    Serialization(#[from] serde_json::Error),

    #[error("sequence value out of range")]
    Sequence(#[from] TryFromIntError),

    #[error("subscription closed")]
    Closed,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl StoreError {
    /// Map an insert failure, turning a unique violation into [`StoreError::Conflict`].
    pub(crate) fn on_insert(error: sqlx::Error, collection: Collection, id: &str) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict {
                collection,
                id: id.to_string(),
            },
            _ => Self::Sql(error),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
