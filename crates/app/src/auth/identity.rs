//! Identity provider client.
//!
//! The portal never authenticates users itself. A bearer token is handed to the identity
//! provider's userinfo endpoint, which answers with the opaque user ID and email.

use async_trait::async_trait;
use fishery::ids::UserId;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Configuration for reaching the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Userinfo endpoint, e.g. `"https://id.example.com/oauth2/userinfo"`.
    pub userinfo_url: String,
}

/// Who a bearer token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub name: Option<String>,
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token. `Ok(None)` means the provider does not recognise it.
    async fn resolve(&self, bearer_token: &str) -> Result<Option<Identity>, IdentityError>;
}

/// HTTP client for an OpenID Connect style userinfo endpoint.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    config: IdentityConfig,
    http: Client,
}

impl HttpIdentityProvider {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, bearer_token: &str) -> Result<Option<Identity>, IdentityError> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(bearer_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();

                return Err(IdentityError::UnexpectedResponse(format!(
                    "userinfo request failed with status {status}: {text}"
                )));
            }
            _ => {}
        }

        let parsed: UserInfoResponse = response.json().await?;

        Ok(Some(Identity {
            user_id: UserId::new(parsed.sub),
            email: parsed.email.unwrap_or_default(),
            name: parsed.name,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

/// Errors that can occur when communicating with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
