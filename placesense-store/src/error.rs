//! Errors raised by the file-backed store and configuration loader.

use std::io;

use camino::Utf8PathBuf;
use placesense_session::SessionConfigError;
use thiserror::Error;

/// Errors from [`JsonFileSelectionStore`](crate::JsonFileSelectionStore).
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Reading or writing the file failed.
    #[error("failed to access selection file {path}")]
    Io {
        /// File being accessed.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: io::Error,
    },
    /// The file is not a JSON object of text values.
    #[error("selection file {path} is not a JSON object of strings")]
    Format {
        /// File being read.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from [`load_config`](crate::load_config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration {path}")]
    Io {
        /// File being read.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("failed to parse configuration {path}")]
    Parse {
        /// File being read.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The settings were parsed but rejected.
    #[error("invalid configuration in {path}")]
    Invalid {
        /// File being read.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: SessionConfigError,
    },
}
