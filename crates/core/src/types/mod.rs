//! Core types for Shelfwise.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod isbn;
pub mod price;
pub mod status;

pub use isbn::{Isbn, IsbnError};
pub use price::{CurrencyCode, Price};
pub use status::*;
