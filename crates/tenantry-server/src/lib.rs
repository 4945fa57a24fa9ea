//! Tenantry Server — HTTP surface for the organization registry and the
//! admin login gateway.
//!
//! The library exposes the router and its state so that the binary and
//! the integration tests assemble the same application.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
