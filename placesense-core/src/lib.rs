//! Core domain rules for the PlaceSense dashboard.
//!
//! Three independent, pure components turn raw signals into judgments the
//! presentation layer can show:
//! - [`classify`] buckets a sentiment score into a five-step
//!   [`SentimentLabel`] and a three-step alert [`Severity`].
//! - [`rank_known`] and [`top_emotion`] order and pick from an
//!   [`EmotionVector`].
//! - [`PlaceComparator`] partitions nearby candidates into higher, lower and
//!   similar tiers and may recommend a best place.
//!
//! Collaborators (the mapping provider, the analytics service and the
//! selection store) are traits so the rules never touch the network or
//! storage.
//!
//! # Examples
//!
//! ```
//! use placesense_core::{FocalPlace, Place, PlaceId, compare};
//!
//! let candidate = Place::new(PlaceId::new("a").expect("valid id"), "Annex")
//!     .with_rating(3.5)
//!     .with_category("lodging");
//! let focal = FocalPlace::new(4.0, ["lodging"]);
//! let outcome = compare(&focal, &[candidate]);
//! let result = outcome.result().expect("a lower-rated candidate");
//! assert_eq!(result.best_place().map(|p| p.name.as_str()), Some("Annex"));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analytics;
mod comparison;
mod emotion;
mod place;
mod provider;
mod rating;
mod recommendation;
mod sentiment;
mod store;
pub mod test_support;

pub use analytics::{
    AnalysisReport, AnalyticsError, AnalyticsService, AspectComparison, BetterBusiness,
    ComparisonReport, LocationSummary, RecommendationSet, Segment, SourceSentiment, WordCloud,
    emphasis_segments,
};
pub use comparison::{
    ComparisonOutcome, ComparisonPolicy, ComparisonPolicyError, ComparisonResult, FocalPlace,
    NoComparableReason, PlaceComparator, compare,
};
pub use emotion::{
    DEFAULT_EXCLUDED_EMOTIONS, DominantEmotion, Emotion, EmotionVector, NO_EMOTION,
    RankedEmotions, default_excluded, rank_known, top_emotion, top_emotion_default,
};
pub use place::{Place, PlaceId, PlaceIdError};
pub use provider::{
    MapView, MapsProvider, Marker, PlaceRecord, ProviderError, Review, SearchQuery, plan_markers,
};
pub use rating::{DEFAULT_MAX_STARS, StarBreakdown};
pub use recommendation::{Priority, Recommendation, RecommendationError, RecommendationList};
pub use sentiment::{
    Classification, SentimentLabel, SentimentScore, SentimentScoreError, Severity, classify,
    classify_optional,
};
pub use store::{
    COMPARISON_RESULT_KEY, PersistedSelection, SELECTED_PLACE_1_KEY, SELECTED_PLACE_2_KEY,
    SelectionStore, StoreError,
};
