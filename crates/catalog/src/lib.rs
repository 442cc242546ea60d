//! Shelfwise catalog browsing controller.
//!
//! Holds the filter/sort/pagination state of a catalog page, turns user
//! input into catalog queries (debounced for text, immediate otherwise),
//! applies only the freshest response and renders it into view models.
//!
//! # Modules
//!
//! - [`state`] - filter state and its page-reset rule
//! - [`debounce`] / [`sequencer`] - when to query and which answer to keep
//! - [`pagination`] / [`render`] - pure display mapping
//! - [`url_sync`] / [`view_mode`] - address bar and persisted layout
//! - [`cart`] - add-to-cart controls
//! - [`controller`] - the event surface tying it together
//! - [`api`] - catalog service client

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod categories;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod pagination;
pub mod render;
pub mod sequencer;
pub mod state;
pub mod url_sync;
pub mod view;
pub mod view_mode;

pub use controller::{CatalogController, CatalogPorts, QueryOutcome};
