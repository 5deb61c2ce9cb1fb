//! [`SelectionStore`] kept in a JSON file.
//!
//! The file holds one JSON object mapping the fixed selection keys to JSON
//! text, mirroring a browser-style key/value store:
//!
//! ```json
//! {"selectedPlace1": "{\"id\":\"q1\",...}", "comparisonResult": "{...}"}
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use placesense_core::{PersistedSelection, SelectionStore, StoreError};

use crate::{FileStoreError, fs};

/// Selection store backed by a single JSON file.
///
/// A missing file loads as an empty selection. Writes replace the whole
/// file and create its parent directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSelectionStore {
    path: Utf8PathBuf,
}

impl JsonFileSelectionStore {
    /// Store selections at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the raw key/value entries.
    ///
    /// # Errors
    /// Returns [`FileStoreError`] when the file exists but cannot be read
    /// or is not an object of strings.
    pub fn read_entries(&self) -> Result<BTreeMap<String, String>, FileStoreError> {
        let Some(text) = fs::read_if_present(&self.path).map_err(|source| self.io(source))?
        else {
            log::debug!("No selection file at {}; starting empty", self.path);
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&text).map_err(|source| FileStoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with `entries`.
    ///
    /// # Errors
    /// Returns [`FileStoreError::Io`] when the file cannot be written.
    pub fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
        let text = serde_json::to_string_pretty(entries).map_err(|source| {
            FileStoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write_replacing(&self.path, &text).map_err(|source| self.io(source))
    }

    fn io(&self, source: std::io::Error) -> FileStoreError {
        FileStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SelectionStore for JsonFileSelectionStore {
    fn load(&self) -> Result<PersistedSelection, StoreError> {
        let entries = self
            .read_entries()
            .map_err(|err| StoreError::Backend(Box::new(err)))?;
        PersistedSelection::from_entries(&entries)
    }

    fn save(&self, state: &PersistedSelection) -> Result<(), StoreError> {
        let entries = state.to_entries()?;
        self.write_entries(&entries)
            .map_err(|err| StoreError::Backend(Box::new(err)))
    }
}
