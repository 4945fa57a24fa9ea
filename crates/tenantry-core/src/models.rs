//! Domain models for Tenantry.
//!
//! These are the core types shared across all crates.

pub mod admin;
pub mod namespace;
pub mod organization;
