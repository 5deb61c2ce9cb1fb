//! Selection slots, request tickets and per-place view state.

use std::collections::BTreeSet;
use std::fmt;

use placesense_core::{
    AnalysisReport, Classification, ComparisonReport, DEFAULT_MAX_STARS, DominantEmotion, Place,
    PlaceId, RankedEmotions, RecommendationList, Segment, SentimentScore, StarBreakdown,
    classify_optional, emphasis_segments, rank_known, top_emotion,
};

/// One of the two places the dashboard can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first selection.
    First,
    /// The second selection.
    Second,
}

impl Slot {
    /// Both slots, in display order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which recommendation checklist to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Advice for the business owner.
    Owner,
    /// Advice for prospective customers.
    Customer,
}

/// Proof that an analysis request was issued for a particular selection.
///
/// Hand it back to [`Session::complete_analysis`](crate::Session::complete_analysis)
/// with the service's answer. A ticket outlives its selection when the
/// slot is reassigned, at which point the answer is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub(crate) slot: Slot,
    pub(crate) generation: u64,
    pub(crate) place_id: PlaceId,
}

impl AnalysisTicket {
    /// Slot the request belongs to.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Selection generation at the time of the request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Place to analyse.
    #[must_use]
    pub const fn place_id(&self) -> &PlaceId {
        &self.place_id
    }
}

/// Proof that a two-place comparison was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTicket {
    pub(crate) first: AnalysisTicket,
    pub(crate) second: AnalysisTicket,
    pub(crate) request: u64,
}

impl ComparisonTicket {
    /// Place held by the first slot when the comparison was requested.
    #[must_use]
    pub const fn first(&self) -> &PlaceId {
        &self.first.place_id
    }

    /// Place held by the second slot when the comparison was requested.
    #[must_use]
    pub const fn second(&self) -> &PlaceId {
        &self.second.place_id
    }
}

/// Whether a completed request changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The answer was stored.
    Applied,
    /// The request failed and the failure was stored.
    Failed,
    /// The selection moved on; the answer was dropped.
    Stale,
}

/// Everything the dashboard shows for one analysed place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceAnalysis {
    /// The analysed place.
    pub place: Place,
    /// Raw answer from the analytics service.
    pub report: AnalysisReport,
    /// Overall polarity, if the report carried a usable one.
    pub score: Option<SentimentScore>,
    /// Label and severity for [`Self::score`].
    pub classification: Option<Classification>,
    /// Known emotions, strongest first.
    pub ranked_emotions: RankedEmotions,
    /// Strongest emotion outside the exclusion set.
    pub dominant_emotion: DominantEmotion,
    /// Star icons for the place's rating.
    pub stars: StarBreakdown,
    /// Owner checklist state.
    pub owner_checklist: RecommendationList,
    /// Customer checklist state.
    pub customer_checklist: RecommendationList,
}

impl PlaceAnalysis {
    /// Derive the dashboard view of `report`.
    #[must_use]
    pub fn new(place: Place, report: AnalysisReport, excluded: &BTreeSet<String>) -> Self {
        let score = report.overall_score();
        let classification = classify_optional(score);
        let ranked_emotions = rank_known(&report.emotions);
        let dominant_emotion = top_emotion(&report.emotions, excluded);
        let stars = StarBreakdown::new(place.effective_rating(), DEFAULT_MAX_STARS);
        let owner_checklist = report.recommendations.owner.clone();
        let customer_checklist = report.recommendations.customer.clone();
        Self {
            place,
            report,
            score,
            classification,
            ranked_emotions,
            dominant_emotion,
            stars,
            owner_checklist,
            customer_checklist,
        }
    }

    /// Alert sentence for the overall score, or `None` when absent.
    #[must_use]
    pub fn alert(&self) -> Option<String> {
        let score = self.score?;
        self.classification
            .map(|classification| classification.describe(score))
    }

    /// Emotion summary split into plain and bold runs.
    #[must_use]
    pub fn summary_segments(&self) -> Vec<Segment> {
        self.report
            .what_emotions_says
            .as_deref()
            .map(emphasis_segments)
            .unwrap_or_default()
    }

    /// Checklist for `audience`.
    #[must_use]
    pub const fn checklist(&self, audience: Audience) -> &RecommendationList {
        match audience {
            Audience::Owner => &self.owner_checklist,
            Audience::Customer => &self.customer_checklist,
        }
    }

    pub(crate) fn checklist_mut(&mut self, audience: Audience) -> &mut RecommendationList {
        match audience {
            Audience::Owner => &mut self.owner_checklist,
            Audience::Customer => &mut self.customer_checklist,
        }
    }
}

/// What a slot currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SlotState {
    /// Nothing selected.
    #[default]
    Empty,
    /// A place is selected and its analysis is in flight.
    Pending(Place),
    /// The analysis arrived.
    Ready(Box<PlaceAnalysis>),
    /// The analysis request failed.
    Failed {
        /// The selected place.
        place: Place,
        /// Error reported by the service.
        message: String,
    },
}

impl SlotState {
    /// Place held by the slot, whatever its progress.
    #[must_use]
    pub fn place(&self) -> Option<&Place> {
        match self {
            Self::Empty => None,
            Self::Pending(place) | Self::Failed { place, .. } => Some(place),
            Self::Ready(analysis) => Some(&analysis.place),
        }
    }

    /// Completed analysis, if any.
    #[must_use]
    pub fn analysis(&self) -> Option<&PlaceAnalysis> {
        match self {
            Self::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }
}

/// Progress of the two-place comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComparisonState {
    /// No comparison requested since the last selection change.
    #[default]
    Idle,
    /// A comparison is in flight.
    Pending,
    /// The comparison arrived, or was restored from the store.
    Ready(Box<ComparisonReport>),
    /// The comparison request failed.
    Failed(String),
}

impl ComparisonState {
    /// Completed comparison, if any.
    #[must_use]
    pub fn report(&self) -> Option<&ComparisonReport> {
        match self {
            Self::Ready(report) => Some(report),
            _ => None,
        }
    }
}
