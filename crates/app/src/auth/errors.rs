//! Auth service errors.

use thiserror::Error;

use crate::{auth::IdentityError, store::StoreError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not recognised")]
    NotFound,

    #[error("storage error")]
    Store(#[source] StoreError),

    #[error("identity provider error")]
    Identity(#[from] IdentityError),
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
