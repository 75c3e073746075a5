//! Payment Handlers

pub(crate) mod certify;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod receipt;
pub(crate) mod reject;
pub(crate) mod reopen;
pub(crate) mod verify;
