//! Registration Handlers

pub(crate) mod create;
pub(crate) mod expire;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod renew;
pub(crate) mod review;
pub(crate) mod update;
