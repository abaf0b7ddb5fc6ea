//! Infrastructure adapters and runtime bootstrap.

pub mod auth;
pub mod error;
pub mod http;
pub mod rpc;
pub mod telemetry;
