//! Shared plumbing for the dealgate service.
//!
//! Provides tracing initialization, the request-id layer, and health handlers.

pub mod health;
pub mod middleware;
pub mod tracing;
