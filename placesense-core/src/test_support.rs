//! In-memory collaborators used by unit and behaviour tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use crate::{
    AnalysisReport, AnalyticsError, AnalyticsService, ComparisonReport, MapView, MapsProvider,
    PersistedSelection, PlaceId, PlaceRecord, ProviderError, Review, SearchQuery, SelectionStore,
    StoreError,
};

/// `MapsProvider` serving canned records.
///
/// Text queries match record names case-insensitively; nearby searches
/// return every record. Rendered views are recorded for inspection.
#[derive(Debug, Default)]
pub struct MemoryMapsProvider {
    records: Vec<PlaceRecord>,
    reviews: HashMap<PlaceId, Vec<Review>>,
    failure: Option<String>,
    rendered: Mutex<Vec<MapView>>,
}

impl MemoryMapsProvider {
    /// Create a provider returning `records`.
    #[must_use]
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PlaceRecord>,
    {
        Self {
            records: records.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Create a provider whose every call fails with `status`.
    #[must_use]
    pub fn failing(status: impl Into<String>) -> Self {
        Self {
            failure: Some(status.into()),
            ..Self::default()
        }
    }

    /// Register reviews returned by [`MapsProvider::details`].
    #[must_use]
    pub fn with_reviews(mut self, place: PlaceId, reviews: Vec<Review>) -> Self {
        self.reviews.insert(place, reviews);
        self
    }

    /// Views passed to [`MapsProvider::render`] so far.
    #[must_use]
    pub fn rendered(&self) -> Vec<MapView> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(status) => Err(ProviderError::Status {
                status: status.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl MapsProvider for MemoryMapsProvider {
    fn search(&self, query: &SearchQuery) -> Result<Vec<PlaceRecord>, ProviderError> {
        self.check()?;
        let matches = match query {
            SearchQuery::Text(text) => {
                let needle = text.to_lowercase();
                self.records
                    .iter()
                    .filter(|record| record.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            SearchQuery::Nearby { .. } => self.records.clone(),
        };
        Ok(matches)
    }

    fn details(&self, place: &PlaceId) -> Result<Vec<Review>, ProviderError> {
        self.check()?;
        self.reviews
            .get(place)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: "NOT_FOUND".to_owned(),
            })
    }

    fn render(&self, view: &MapView) -> Result<(), ProviderError> {
        self.check()?;
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
        Ok(())
    }
}

/// `AnalyticsService` answering from canned reports.
///
/// Places without a report yield [`AnalyticsError::NoReviews`].
#[derive(Debug, Default)]
pub struct StubAnalytics {
    reports: HashMap<PlaceId, AnalysisReport>,
    comparison: Option<ComparisonReport>,
}

impl StubAnalytics {
    /// Register a single-place report.
    #[must_use]
    pub fn with_report(mut self, place: PlaceId, report: AnalysisReport) -> Self {
        self.reports.insert(place, report);
        self
    }

    /// Register the report returned for any two-place comparison.
    #[must_use]
    pub fn with_comparison(mut self, report: ComparisonReport) -> Self {
        self.comparison = Some(report);
        self
    }
}

impl AnalyticsService for StubAnalytics {
    fn analyze(&self, place: &PlaceId) -> Result<AnalysisReport, AnalyticsError> {
        self.reports
            .get(place)
            .cloned()
            .ok_or_else(|| AnalyticsError::NoReviews(place.clone()))
    }

    fn compare(
        &self,
        first: &PlaceId,
        _second: &PlaceId,
    ) -> Result<ComparisonReport, AnalyticsError> {
        self.comparison
            .clone()
            .ok_or_else(|| AnalyticsError::NoReviews(first.clone()))
    }
}

/// `SelectionStore` holding text entries in memory.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySelectionStore {
    /// Raw text stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Result<PersistedSelection, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        PersistedSelection::from_entries(&entries)
    }

    fn save(&self, state: &PersistedSelection) -> Result<(), StoreError> {
        let encoded = state.to_entries()?;
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = encoded;
        Ok(())
    }
}
