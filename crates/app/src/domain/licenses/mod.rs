pub mod data;
pub mod monitor;
pub(crate) mod repository;
pub mod service;

pub use monitor::EligibilityMonitor;
pub use service::*;
