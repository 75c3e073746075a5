//! Auth middleware.

use std::sync::Arc;

use fishery_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let actor = match state.app.auth.authenticate_bearer(token).await {
        Ok(actor) => actor,
        Err(AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid bearer token"));

            return;
        }
        Err(AuthServiceError::Store(source)) => {
            error!("failed to load caller profile: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
        Err(AuthServiceError::Identity(source)) => {
            error!("identity provider error during token authentication: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
