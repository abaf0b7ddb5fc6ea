//! Domain layer types and invariants.

pub mod error;
pub mod listings;
pub mod search;
pub mod session;
