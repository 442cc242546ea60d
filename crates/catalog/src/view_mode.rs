//! Persisted grid/list preference.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use shelfwise_core::ViewMode;
use thiserror::Error;

/// Errors from a [`ViewModeStore`].
#[derive(Debug, Error)]
pub enum ViewModeStoreError {
    #[error("view mode store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("view mode store is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-value slot holding the last chosen view mode.
pub trait ViewModeStore: Send + Sync {
    /// Stored preference, `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded.
    fn load(&self) -> Result<Option<ViewMode>, ViewModeStoreError>;

    /// Persist the preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, mode: ViewMode) -> Result<(), ViewModeStoreError>;
}

/// Load the stored preference, falling back to the default on any problem.
pub fn load_or_default(store: &dyn ViewModeStore) -> ViewMode {
    match store.load() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read view mode; using default");
            ViewMode::default()
        }
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryViewModeStore {
    mode: Mutex<Option<ViewMode>>,
}

impl MemoryViewModeStore {
    #[must_use]
    pub const fn with_mode(mode: ViewMode) -> Self {
        Self {
            mode: Mutex::new(Some(mode)),
        }
    }
}

impl ViewModeStore for MemoryViewModeStore {
    fn load(&self) -> Result<Option<ViewMode>, ViewModeStoreError> {
        Ok(*self.mode.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn save(&self, mode: ViewMode) -> Result<(), ViewModeStoreError> {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner) = Some(mode);
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(rename = "catalogView", default)]
    catalog_view: Option<ViewMode>,
}

/// Store backed by a small JSON file: `{"catalogView":"list"}`.
#[derive(Debug, Clone)]
pub struct FileViewModeStore {
    path: PathBuf,
}

impl FileViewModeStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ViewModeStore for FileViewModeStore {
    fn load(&self) -> Result<Option<ViewMode>, ViewModeStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredPreferences = serde_json::from_str(&contents)?;
        Ok(stored.catalog_view)
    }

    fn save(&self, mode: ViewMode) -> Result<(), ViewModeStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_string(&StoredPreferences {
            catalog_view: Some(mode),
        })?;
        std::fs::write(&self.path, body)?;
        tracing::debug!(path = %self.path.display(), mode = %mode, "View mode saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryViewModeStore::default();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(load_or_default(&store), ViewMode::Grid);

        store.save(ViewMode::List).unwrap();
        assert_eq!(load_or_default(&store), ViewMode::List);
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileViewModeStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = FileViewModeStore::new(&path);

        store.save(ViewMode::List).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"catalogView":"list"}"#
        );
        assert_eq!(store.load().unwrap(), Some(ViewMode::List));
    }

    #[test]
    fn test_file_store_invalid_value_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"catalogView":"carousel"}"#).unwrap();

        let store = FileViewModeStore::new(&path);
        assert!(matches!(store.load(), Err(ViewModeStoreError::Parse(_))));
        assert_eq!(load_or_default(&store), ViewMode::Grid);
    }
}
