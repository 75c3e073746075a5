//! Authentication

mod errors;
pub mod identity;
mod service;

pub use errors::*;
pub use identity::{
    HttpIdentityProvider, Identity, IdentityConfig, IdentityError, IdentityProvider,
    MockIdentityProvider,
};
pub use service::*;
