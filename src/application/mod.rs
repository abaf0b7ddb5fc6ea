//! Application services layer.

pub mod chrome;
pub mod error;
pub mod home;
pub mod listings;
pub mod prefetch;
pub mod session;
