//! Fishery JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use fishery_app::{
    auth::{HttpIdentityProvider, IdentityProvider},
    context::AppContext,
};

use crate::{
    config::{ServerConfig, db::StoreBackend},
    observability::{Observability, metrics_handler, request_logging},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod history;
mod licenses;
mod notifications;
mod observability;
mod payments;
mod registrations;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod verifications;

/// Fishery JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "tracing subscriber failed to install, eprintln is all that is left"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(HttpIdentityProvider::new((&config.auth).into()));

    let app = match (config.database.store, config.database.database_url.as_deref()) {
        (StoreBackend::Memory, _) => {
            info!("using in-memory document store");

            AppContext::in_memory(identity)
        }
        (StoreBackend::Postgres, Some(url)) => {
            match AppContext::from_database_url(url, identity).await {
                Ok(app) => app,
                Err(init_error) => {
                    error!("failed to initialize app context: {init_error}");

                    process::exit(1);
                }
            }
        }
        (StoreBackend::Postgres, None) => {
            error!("DATABASE_URL is required when STORE=postgres");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Fishery API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
