//! Cross-cutting HTTP service plumbing: error bodies, tracing, middleware,
//! health probes and environment configuration.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
