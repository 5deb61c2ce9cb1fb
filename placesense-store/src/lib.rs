//! File-backed persistence for PlaceSense.
//!
//! Provides [`JsonFileSelectionStore`], a [`SelectionStore`] that keeps the
//! last selections in one JSON file, and [`load_config`] for reading a
//! [`SessionConfig`] from disk. File access goes through `cap-std` with
//! UTF-8 paths from `camino`.
//!
//! [`SelectionStore`]: placesense_core::SelectionStore
//! [`SessionConfig`]: placesense_session::SessionConfig

#![forbid(unsafe_code)]

mod config;
mod error;
mod file_store;
mod fs;

pub use config::load_config;
pub use error::{ConfigError, FileStoreError};
pub use file_store::JsonFileSelectionStore;
