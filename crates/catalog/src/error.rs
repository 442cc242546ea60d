//! Unified error handling with Sentry integration.
//!
//! Controller events never fail; they recover in the view. `AppError` covers
//! what the runner reports while assembling a session.

use thiserror::Error;

use crate::api::CatalogError;
use crate::view_mode::ViewModeStoreError;

/// Application-level error type for the catalog runner.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog service operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// View mode store could not be used.
    #[error("View mode store error: {0}")]
    Store(#[from] ViewModeStoreError),
}

impl AppError {
    /// Log the error and forward it to Sentry.
    pub fn report(&self) {
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Catalog session error"
        );
    }
}
