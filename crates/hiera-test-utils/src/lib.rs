//! Shared test utilities for the hiera-bridge workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each hand-roll data directories. It is a dev-dependency only and is never
//! published.
//!
//! # Modules
//!
//! - [`hiera`]: [`TestHiera`] builder for a config file plus data directory
//! - [`scope`]: helpers for building binding mappings

pub mod hiera;
pub mod scope;

pub use hiera::TestHiera;
pub use scope::bindings;
