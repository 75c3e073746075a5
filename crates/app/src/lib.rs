//! Application services, persistence and identity integration for the fishery portal.

pub mod auth;
pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod store;

#[cfg(test)]
mod test;
