//! State

use std::{sync::Arc, time::Instant};

use fishery_app::context::AppContext;

/// Shared by every handler through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) started: Instant,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            app,
            started: Instant::now(),
        })
    }
}
