//! Errors

use fishery::errors::WorkflowError;
use fishery_app::domain::ServiceError;
use salvo::http::StatusError;
use tracing::error;

/// Map a service failure onto the HTTP status the client sees.
pub(crate) fn into_status_error(error: ServiceError) -> StatusError {
    match error {
        ServiceError::Workflow(workflow) => workflow_status_error(&workflow),
        ServiceError::AlreadyExists { .. } => StatusError::conflict().brief(error.to_string()),
        ServiceError::Store(source) => {
            error!("storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn workflow_status_error(error: &WorkflowError) -> StatusError {
    let status = match error {
        WorkflowError::Validation(_) => StatusError::bad_request(),
        WorkflowError::Forbidden { .. } => StatusError::forbidden(),
        WorkflowError::NotFound { .. } => StatusError::not_found(),
        WorkflowError::InvalidTransition { .. }
        | WorkflowError::AlreadyIssued(_)
        | WorkflowError::DuplicateSubmission { .. } => StatusError::conflict(),
    };

    status.brief(error.to_string())
}

#[cfg(test)]
mod tests {
    use fishery::{
        actors::Role,
        errors::ValidationError,
        ids::RegistrationId,
        registrations::RegistrationType,
    };
    use fishery_app::store::StoreError;
    use salvo::http::StatusCode;

    use super::*;

    fn status(error: impl Into<ServiceError>) -> StatusCode {
        into_status_error(error.into()).code
    }

    #[test]
    fn validation_is_bad_request() {
        assert_eq!(
            status(WorkflowError::from(ValidationError::EmptyOrNumber)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn forbidden_and_not_found() {
        assert_eq!(
            status(WorkflowError::Forbidden {
                role: Role::Mto,
                action: "verify a payment"
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(WorkflowError::not_found("payments", "TXN-1")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn state_conflicts_are_409() {
        let conflicts = [
            ServiceError::from(WorkflowError::InvalidTransition {
                entity: "payment",
                from: "Paid",
                action: "reject",
            }),
            ServiceError::from(WorkflowError::AlreadyIssued(RegistrationId::new("VES-1"))),
            ServiceError::from(WorkflowError::DuplicateSubmission {
                owner: "owner-1".to_string(),
                kind: RegistrationType::Gear,
            }),
            ServiceError::AlreadyExists {
                collection: "payments",
                id: "VES-1".to_string(),
            },
        ];

        for error in conflicts {
            assert_eq!(into_status_error(error).code, StatusCode::CONFLICT);
        }
    }

    #[test]
    fn storage_failures_are_500() {
        let error = ServiceError::Store(StoreError::Closed);

        assert_eq!(into_status_error(error).code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
