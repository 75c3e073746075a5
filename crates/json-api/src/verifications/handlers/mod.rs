//! Verification Handlers

pub(crate) mod create;
pub(crate) mod flag;
pub(crate) mod get;
pub(crate) mod index;
