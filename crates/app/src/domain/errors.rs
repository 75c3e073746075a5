//! Service errors.

use fishery::errors::WorkflowError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("{collection} {id} already exists")]
    AlreadyExists { collection: &'static str, id: String },

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { collection, id } => {
                Self::Workflow(WorkflowError::not_found(collection.as_str(), id))
            }
            StoreError::Conflict { collection, id } => Self::AlreadyExists {
                collection: collection.as_str(),
                id,
            },
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::store::Collection;

    use super::*;

    #[test]
    fn store_not_found_becomes_workflow_not_found() {
        let error = ServiceError::from(StoreError::NotFound {
            collection: Collection::Payments,
            id: "TXN-1".to_string(),
        });

        assert!(
            matches!(
                &error,
                ServiceError::Workflow(WorkflowError::NotFound {
                    collection: "payments",
                    id
                }) if id == "TXN-1"
            ),
            "got {error:?}"
        );
    }

    #[test]
    fn store_conflict_becomes_already_exists() {
        let error = ServiceError::from(StoreError::Conflict {
            collection: Collection::Registrations,
            id: "REN-REG-003-1".to_string(),
        });

        assert!(matches!(error, ServiceError::AlreadyExists { .. }));
    }
}
