//! Persistence of the user's last selections.
//!
//! State is kept as text values under fixed string keys so any key-value
//! backend can hold it. Values are reloaded verbatim; there is no schema
//! versioning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ComparisonReport, Place};

/// Key holding the first selected place.
pub const SELECTED_PLACE_1_KEY: &str = "selectedPlace1";
/// Key holding the second selected place.
pub const SELECTED_PLACE_2_KEY: &str = "selectedPlace2";
/// Key holding the last two-place comparison.
pub const COMPARISON_RESULT_KEY: &str = "comparisonResult";

/// Everything restored on the next load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedSelection {
    /// First selection slot.
    pub first: Option<Place>,
    /// Second selection slot.
    pub second: Option<Place>,
    /// Last comparison between the two slots.
    pub comparison: Option<ComparisonReport>,
}

/// Errors raised by a [`SelectionStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium failed.
    #[error("selection store backend failed")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A value could not be encoded.
    #[error("failed to encode {key}")]
    Encode {
        /// Key being written.
        key: &'static str,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A stored value could not be decoded.
    #[error("failed to decode {key}")]
    Decode {
        /// Key being read.
        key: &'static str,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

impl PersistedSelection {
    /// Encode into key/value text entries; empty slots are omitted.
    ///
    /// # Errors
    /// Returns [`StoreError::Encode`] when a value cannot be serialised.
    pub fn to_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let mut entries = BTreeMap::new();
        encode_into(&mut entries, SELECTED_PLACE_1_KEY, self.first.as_ref())?;
        encode_into(&mut entries, SELECTED_PLACE_2_KEY, self.second.as_ref())?;
        encode_into(&mut entries, COMPARISON_RESULT_KEY, self.comparison.as_ref())?;
        Ok(entries)
    }

    /// Decode from key/value text entries; missing keys stay empty.
    ///
    /// # Errors
    /// Returns [`StoreError::Decode`] when a present value is malformed.
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Result<Self, StoreError> {
        Ok(Self {
            first: decode_from(entries, SELECTED_PLACE_1_KEY)?,
            second: decode_from(entries, SELECTED_PLACE_2_KEY)?,
            comparison: decode_from(entries, COMPARISON_RESULT_KEY)?,
        })
    }
}

fn encode_into<T: Serialize>(
    entries: &mut BTreeMap<String, String>,
    key: &'static str,
    value: Option<&T>,
) -> Result<(), StoreError> {
    if let Some(inner) = value {
        let text =
            serde_json::to_string(inner).map_err(|source| StoreError::Encode { key, source })?;
        entries.insert(key.to_owned(), text);
    }
    Ok(())
}

fn decode_from<T: for<'de> Deserialize<'de>>(
    entries: &BTreeMap<String, String>,
    key: &'static str,
) -> Result<Option<T>, StoreError> {
    entries
        .get(key)
        .map(|text| serde_json::from_str(text).map_err(|source| StoreError::Decode { key, source }))
        .transpose()
}

/// Load and save the user's selections.
///
/// Implementations must be thread-safe (`Send` + `Sync`). A store that has
/// never been written loads as [`PersistedSelection::default`].
pub trait SelectionStore: Send + Sync {
    /// Load the last saved state.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend fails or holds malformed data.
    fn load(&self) -> Result<PersistedSelection, StoreError>;

    /// Replace the saved state.
    ///
    /// # Errors
    /// Returns [`StoreError`] when encoding or writing fails.
    fn save(&self, state: &PersistedSelection) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaceId;
    use rstest::rstest;

    #[rstest]
    fn empty_state_writes_no_keys() {
        let entries = PersistedSelection::default()
            .to_entries()
            .expect("encode state");
        assert!(entries.is_empty());
    }

    #[rstest]
    fn places_are_stored_under_fixed_keys() {
        let place = Place::new(PlaceId::new("p1").expect("valid id"), "Hotel").with_rating(4.1);
        let state = PersistedSelection {
            first: Some(place.clone()),
            ..PersistedSelection::default()
        };
        let entries = state.to_entries().expect("encode state");
        assert!(entries.contains_key(SELECTED_PLACE_1_KEY));
        assert!(!entries.contains_key(SELECTED_PLACE_2_KEY));
        let restored = PersistedSelection::from_entries(&entries).expect("decode state");
        assert_eq!(restored.first, Some(place));
    }

    #[rstest]
    fn malformed_value_names_its_key() {
        let entries = BTreeMap::from([(SELECTED_PLACE_2_KEY.to_owned(), "{oops".to_owned())]);
        let err = PersistedSelection::from_entries(&entries).expect_err("malformed value");
        assert!(matches!(
            err,
            StoreError::Decode {
                key: SELECTED_PLACE_2_KEY,
                ..
            }
        ));
    }
}
