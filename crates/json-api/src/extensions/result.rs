//! Result helpers for handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Collapse infrastructure failures that the client cannot act on into a `500`.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(context, %source, "handler failed");

            StatusError::internal_server_error().brief(context)
        })
    }
}
