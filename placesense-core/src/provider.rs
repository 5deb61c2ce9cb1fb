//! The mapping collaborator.
//!
//! Map search, place details and rendering sit behind [`MapsProvider`] so
//! nothing in this workspace depends on a live mapping service.

use std::collections::BTreeSet;

use geo::{Coord, Rect};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Place, PlaceId};

/// A place as returned by a map search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider identifier.
    pub place_id: PlaceId,
    /// Display name.
    pub name: String,
    /// Average star rating, if rated.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Provider category tags.
    #[serde(default)]
    pub types: BTreeSet<String>,
    /// Point location; absent for malformed records.
    #[serde(default)]
    pub location: Option<Coord<f64>>,
    /// Suggested viewport.
    #[serde(default)]
    pub viewport: Option<Rect<f64>>,
    /// Short address.
    #[serde(default)]
    pub vicinity: String,
}

impl PlaceRecord {
    /// Convert into the core [`Place`] model.
    #[must_use]
    pub fn to_place(&self) -> Place {
        Place {
            id: self.place_id.clone(),
            name: self.name.clone(),
            rating: self.rating,
            categories: self.types.clone(),
            vicinity: self.vicinity.clone(),
            location: self.location,
            viewport: self.viewport,
        }
    }
}

/// A single review returned by a details lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer display name.
    pub author: String,
    /// Star rating given by the reviewer.
    pub rating: f64,
    /// Review body.
    pub text: String,
}

/// A search issued to the mapping collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchQuery {
    /// Free-text search, as typed in a search box.
    Text(String),
    /// Places around a point.
    Nearby {
        /// Search centre.
        location: Coord<f64>,
        /// Radius in metres.
        radius_m: u32,
        /// Keyword narrowing the search.
        keyword: String,
    },
}

/// A marker to draw on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Tooltip title.
    pub title: String,
    /// Marker position.
    pub position: Coord<f64>,
}

/// What the map should display after a search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapView {
    /// Markers replacing any previous ones.
    pub markers: Vec<Marker>,
    /// Area the map should fit, if any marker was placed.
    pub bounds: Option<Rect<f64>>,
    /// Place that becomes the current selection.
    pub selected: Option<Place>,
}

/// Errors surfaced by a [`MapsProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider was not loaded or configured.
    #[error("maps provider is unavailable: {0}")]
    Unavailable(String),
    /// The provider answered with a non-OK status.
    #[error("maps request failed with status {status}")]
    Status {
        /// Status reported by the provider.
        status: String,
    },
}

/// Capability to search, look up and render places.
///
/// Implementations must be thread-safe (`Send` + `Sync`).
pub trait MapsProvider: Send + Sync {
    /// Run a search.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when the provider cannot answer.
    fn search(&self, query: &SearchQuery) -> Result<Vec<PlaceRecord>, ProviderError>;

    /// Fetch reviews for a place.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when the lookup fails.
    fn details(&self, place: &PlaceId) -> Result<Vec<Review>, ProviderError>;

    /// Draw markers and fit bounds.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when rendering fails.
    fn render(&self, view: &MapView) -> Result<(), ProviderError>;
}

/// Turn search results into markers, bounds and a selection.
///
/// Records without a location are skipped with a warning. Bounds cover each
/// record's viewport, or its location when it has none. The last usable
/// record becomes the selection.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use placesense_core::{PlaceId, PlaceRecord, plan_markers};
///
/// let record = PlaceRecord {
///     place_id: PlaceId::new("p1").expect("valid id"),
///     name: "Temple".into(),
///     rating: Some(4.8),
///     types: Default::default(),
///     location: Some(Coord { x: 80.64, y: 7.29 }),
///     viewport: None,
///     vicinity: String::new(),
/// };
/// let view = plan_markers(&[record]);
/// assert_eq!(view.markers.len(), 1);
/// assert!(view.selected.is_some());
/// ```
#[must_use]
pub fn plan_markers(records: &[PlaceRecord]) -> MapView {
    let mut view = MapView::default();
    for record in records {
        let Some(position) = record.location else {
            warn!("Skipping place {} without geometry", record.place_id);
            continue;
        };
        view.markers.push(Marker {
            title: record.name.clone(),
            position,
        });
        let extent = record
            .viewport
            .unwrap_or_else(|| Rect::new(position, position));
        view.bounds = Some(match view.bounds {
            Some(bounds) => union(bounds, extent),
            None => extent,
        });
        view.selected = Some(record.to_place());
    }
    view
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}
