//! Depot helper extensions.

use std::any::Any;

use fishery::actors::Actor;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_actor(&mut self, actor: Actor);

    /// The authenticated caller, as stored by the auth middleware.
    fn actor_or_401(&self) -> Result<Actor, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.inject(actor);
    }

    fn actor_or_401(&self) -> Result<Actor, StatusError> {
        self.obtain::<Actor>()
            .cloned()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
