//! Facade crate for PlaceSense.
//!
//! Re-exports the comparative analytics rules from `placesense-core` and
//! exposes the session and file store behind feature flags.

#![forbid(unsafe_code)]

pub use placesense_core::{
    AnalysisReport, AnalyticsError, AnalyticsService, Classification, ComparisonOutcome,
    ComparisonPolicy, ComparisonReport, ComparisonResult, DominantEmotion, Emotion,
    EmotionVector, FocalPlace, MapView, MapsProvider, NoComparableReason, PersistedSelection,
    Place, PlaceComparator, PlaceId, PlaceRecord, Priority, ProviderError, RankedEmotions,
    Recommendation, RecommendationList, SearchQuery, SelectionStore, SentimentLabel,
    SentimentScore, Severity, StarBreakdown, StoreError, classify, compare, rank_known,
    top_emotion,
};

#[cfg(feature = "session")]
pub use placesense_session::{
    AnalysisTicket, Audience, Completion, Session, SessionConfig, SessionError, Slot, SlotState,
};

#[cfg(feature = "store-file")]
pub use placesense_store::{ConfigError, FileStoreError, JsonFileSelectionStore, load_config};
