//! Fishery Domain Concerns

pub mod errors;
pub mod licenses;
pub mod notifications;
pub mod payments;
pub mod profiles;
pub mod registrations;
pub mod verification;

pub use errors::ServiceError;
