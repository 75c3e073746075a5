//! Fishery
//!
//! Workflow rules for the municipal fishery registration portal: vessel and gear
//! registrations, the two-office payment approval chain, license issuance and the
//! `BoatR`/`FishR` verification flags.
//!
//! Everything in this crate is pure. Storage, identity and notification delivery live in
//! `fishery-app`; this crate only decides which transitions are legal and what the
//! resulting documents look like.

pub mod actors;
pub mod errors;
pub mod history;
pub mod ids;
pub mod licenses;
pub mod notifications;
pub mod payments;
pub mod prelude;
pub mod registrations;
pub mod verification;
