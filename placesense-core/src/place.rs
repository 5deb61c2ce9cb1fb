//! Places supplied by the mapping collaborator.
//!
//! The core only reads places; every operation that compares ratings goes
//! through [`Place::effective_rating`] so a missing rating behaves like a
//! rating of `0.0`.

use std::collections::BTreeSet;
use std::fmt;

use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier assigned to a place by the mapping collaborator.
///
/// # Examples
/// ```
/// use placesense_core::PlaceId;
///
/// let id = PlaceId::new("ChIJ-kandy").expect("non-empty id");
/// assert_eq!(id.as_str(), "ChIJ-kandy");
/// assert!(PlaceId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceId(String);

/// Errors returned by [`PlaceId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceIdError {
    /// The identifier was empty or only whitespace.
    #[error("place identifier must not be empty")]
    Empty,
}

impl PlaceId {
    /// Validate and wrap a place identifier.
    ///
    /// # Errors
    /// Returns [`PlaceIdError::Empty`] for blank identifiers.
    pub fn new(raw: impl Into<String>) -> Result<Self, PlaceIdError> {
        let id = raw.into();
        if id.trim().is_empty() {
            return Err(PlaceIdError::Empty);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PlaceId {
    type Error = PlaceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaceId> for String {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}

/// A place the user can select or compare against.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use placesense_core::{Place, PlaceId};
///
/// let id = PlaceId::new("hotel-1").expect("valid id");
/// let place = Place::new(id, "Lake View Hotel")
///     .with_rating(4.2)
///     .with_category("lodging");
///
/// assert_eq!(place.effective_rating(), 4.2);
/// assert!(place.categories.contains("lodging"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Identifier assigned by the mapping collaborator.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// Average star rating, typically `0.0..=5.0`, when the provider has one.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Category tags such as `lodging` or `cafe`.
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Short address used only for display.
    #[serde(default)]
    pub vicinity: String,
    /// Point location, when known.
    #[serde(default)]
    pub location: Option<Coord<f64>>,
    /// Recommended viewport, when known.
    #[serde(default)]
    pub viewport: Option<Rect<f64>>,
}

impl Place {
    /// Construct a place with no rating, categories or geometry.
    #[must_use]
    pub fn new(id: PlaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rating: None,
            categories: BTreeSet::new(),
            vicinity: String::new(),
            location: None,
            viewport: None,
        }
    }

    /// Set the rating while returning `self` for chaining.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Add a category tag while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Set the display vicinity while returning `self` for chaining.
    #[must_use]
    pub fn with_vicinity(mut self, vicinity: impl Into<String>) -> Self {
        self.vicinity = vicinity.into();
        self
    }

    /// Set the point location while returning `self` for chaining.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Rating used for every comparison.
    ///
    /// Missing and non-finite ratings count as `0.0`.
    #[must_use]
    pub fn effective_rating(&self) -> f64 {
        self.rating.filter(|r| r.is_finite()).unwrap_or(0.0)
    }

    /// Report whether the place carries at least one of `categories`.
    #[must_use]
    pub fn shares_category(&self, categories: &BTreeSet<String>) -> bool {
        !self.categories.is_disjoint(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(raw: &str) -> PlaceId {
        PlaceId::new(raw).expect("valid id")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn place_id_rejects_blank(#[case] raw: &str) {
        assert_eq!(PlaceId::new(raw), Err(PlaceIdError::Empty));
    }

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(f64::NAN), 0.0)]
    #[case(Some(3.5), 3.5)]
    fn effective_rating_substitutes_zero(#[case] rating: Option<f64>, #[case] expected: f64) {
        let mut place = Place::new(id("p"), "P");
        place.rating = rating;
        assert_eq!(place.effective_rating(), expected);
    }

    #[rstest]
    fn shares_category_needs_one_overlap() {
        let place = Place::new(id("p"), "P")
            .with_category("lodging")
            .with_category("point_of_interest");
        let lodging = BTreeSet::from(["lodging".to_owned()]);
        let cafe = BTreeSet::from(["cafe".to_owned()]);
        assert!(place.shares_category(&lodging));
        assert!(!place.shares_category(&cafe));
    }

    #[rstest]
    fn place_id_deserialisation_rejects_blank() {
        let result: Result<PlaceId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
