//! License Handlers

pub(crate) mod create;
pub(crate) mod eligible;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod revoke;
