pub mod data;
pub(crate) mod repository;
pub mod service;

pub use data::*;
pub use service::*;
