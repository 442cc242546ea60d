//! Shelfwise Core - Shared types library.
//!
//! This crate provides the domain types used by the Shelfwise components:
//! - `catalog` - Catalog browsing controller and its HTTP client
//! - `integration-tests` - End-to-end tests against a mock catalog service
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for book identifiers, prices, stock and view modes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
