//! Auth Config

use clap::Args;
use fishery_app::auth::IdentityConfig;

/// Identity provider settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Userinfo endpoint used to resolve bearer tokens
    #[arg(long, env = "IDENTITY_USERINFO_URL")]
    pub userinfo_url: String,
}

impl From<&AuthConfig> for IdentityConfig {
    fn from(config: &AuthConfig) -> Self {
        IdentityConfig {
            userinfo_url: config.userinfo_url.clone(),
        }
    }
}
