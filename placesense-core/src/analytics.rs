//! Payloads exchanged with the sentiment analytics service.
//!
//! The service computes every score; these types only carry its answers.
//! Field names follow the service's JSON.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EmotionVector, PlaceId, RecommendationList, SentimentScore};

/// Sentiment aggregated over one review source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSentiment {
    /// Mean polarity across the source's reviews.
    pub average_sentiment: f64,
    /// Mean star count across the source's reviews.
    #[serde(default)]
    pub avg_star_count: f64,
    /// Per-category breakdown, passed through untouched.
    #[serde(default)]
    pub sentiment_category_group: serde_json::Value,
}

impl SourceSentiment {
    /// Polarity as a validated score, or `None` when it is unusable.
    #[must_use]
    pub fn score(&self) -> Option<SentimentScore> {
        SentimentScore::new(self.average_sentiment).ok()
    }
}

/// Owner-facing and customer-facing recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Advice for the business owner.
    #[serde(default, alias = "owner_recommendations")]
    pub owner: RecommendationList,
    /// Advice for prospective customers.
    #[serde(default, alias = "customer_recommendations")]
    pub customer: RecommendationList,
}

/// A base64-encoded word-cloud image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordCloud(String);

impl WordCloud {
    /// Wrap an encoded image.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded text, e.g. for a data URI.
    #[must_use]
    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Decode the image bytes.
    ///
    /// # Errors
    /// Returns [`base64::DecodeError`] when the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.0.trim())
    }
}

/// Full analysis of a single place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Name the service resolved for the place.
    pub location_name: String,
    /// Sentiment over Google reviews.
    pub google_sentiment: SourceSentiment,
    /// Sentiment over `TripAdvisor` reviews.
    pub tripadvisor_sentiment: SourceSentiment,
    /// Combined score, when the service sent one.
    #[serde(default)]
    pub overall_sentiment: Option<f64>,
    /// Emotion counts across all reviews.
    #[serde(default)]
    pub emotions: EmotionVector,
    /// Generated recommendations.
    #[serde(default)]
    pub recommendations: RecommendationSet,
    /// Word cloud over all reviews.
    #[serde(default)]
    pub word_cloud: WordCloud,
    /// Narrative summary of the emotions, with `**bold**` markers.
    #[serde(default)]
    pub what_emotions_says: Option<String>,
}

impl AnalysisReport {
    /// Overall polarity to classify.
    ///
    /// Uses the service's own figure when present and valid, otherwise
    /// combines the per-source averages. A `TripAdvisor` average of exactly
    /// zero means that source had no reviews.
    #[must_use]
    pub fn overall_score(&self) -> Option<SentimentScore> {
        if let Some(score) = self
            .overall_sentiment
            .and_then(|value| SentimentScore::new(value).ok())
        {
            return Some(score);
        }
        let google = self.google_sentiment.score()?;
        let tripadvisor = self
            .tripadvisor_sentiment
            .score()
            // A literal 0 means the source had no reviews.
            .filter(|score| score.value() != 0.0);
        Some(SentimentScore::overall(google, tripadvisor))
    }
}

/// Which business won an aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BetterBusiness {
    /// Index of the winner, `1` or `2`.
    Index(u8),
    /// Name of the winner, or a marker such as `"tie"`.
    Named(String),
}

/// One row of the two-place aspect table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectComparison {
    /// Aspect being compared, e.g. "cleanliness".
    pub aspect: String,
    /// Score of the first place.
    pub business1_score: f64,
    /// Score of the second place.
    pub business2_score: f64,
    /// Winner as reported by the service.
    pub better_business: BetterBusiness,
}

/// Per-location summary attached to a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    /// Resolved location name.
    pub name: String,
    /// Sentiment over Google reviews.
    pub google_sentiment: SourceSentiment,
    /// Combined polarity.
    pub overall_sentiment: f64,
    /// Emotion counts.
    #[serde(default)]
    pub emotions: EmotionVector,
}

/// Analysis of two places side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Aspect-by-aspect table.
    #[serde(default)]
    pub aspect_comparison: Vec<AspectComparison>,
    /// Summary for the first place.
    pub location1: LocationSummary,
    /// Summary for the second place.
    pub location2: LocationSummary,
    /// Recommendations derived from the comparison.
    #[serde(default)]
    pub recommendations: RecommendationSet,
}

/// Errors surfaced by an [`AnalyticsService`].
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The service could not be reached or answered with a failure.
    #[error("analytics request for {place} failed: {message}")]
    Request {
        /// Place the request was about.
        place: PlaceId,
        /// Transport or service message.
        message: String,
    },
    /// The service reported no reviews for the place.
    #[error("no reviews found for {0}")]
    NoReviews(PlaceId),
    /// The payload could not be decoded.
    #[error("analytics payload could not be decoded")]
    Decode(#[from] serde_json::Error),
}

/// Remote sentiment analysis.
///
/// Implementations own transport, timeouts and retries; callers treat every
/// error as a terminal "failed" state for that request.
pub trait AnalyticsService: Send + Sync {
    /// Analyse one place.
    ///
    /// # Errors
    /// Returns [`AnalyticsError`] when the request cannot be completed.
    fn analyze(&self, place: &PlaceId) -> Result<AnalysisReport, AnalyticsError>;

    /// Analyse two places side by side.
    ///
    /// # Errors
    /// Returns [`AnalyticsError`] when the request cannot be completed.
    fn compare(&self, first: &PlaceId, second: &PlaceId)
    -> Result<ComparisonReport, AnalyticsError>;
}

/// A run of summary text, bold or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text without emphasis markers.
    pub text: String,
    /// Whether the run was wrapped in `**`.
    pub bold: bool,
}

#[expect(
    clippy::expect_used,
    reason = "the pattern is a compile-time constant"
)]
fn emphasis_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid emphasis pattern"))
}

/// Split summary text into plain and bold runs.
///
/// Each shortest `**…**` span becomes a bold run without its markers.
/// Unpaired markers stay in the plain text. Empty runs are dropped.
///
/// # Examples
/// ```
/// use placesense_core::emphasis_segments;
///
/// let segments = emphasis_segments("Mostly **joy**, some fear.");
/// assert_eq!(segments.len(), 3);
/// assert!(segments[1].bold);
/// assert_eq!(segments[1].text, "joy");
/// ```
#[must_use]
pub fn emphasis_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for captures in emphasis_pattern().captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        push_segment(&mut segments, text.get(cursor..whole.start()), false);
        push_segment(&mut segments, Some(inner.as_str()), true);
        cursor = whole.end();
    }
    push_segment(&mut segments, text.get(cursor..), false);
    segments
}

fn push_segment(segments: &mut Vec<Segment>, text: Option<&str>, bold: bool) {
    if let Some(run) = text.filter(|run| !run.is_empty()) {
        segments.push(Segment {
            text: run.to_owned(),
            bold,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const REPORT: &str = r#"{
        "location_name": "Queen's Hotel",
        "google_sentiment": {"average_sentiment": 0.42, "avg_star_count": 4.3, "sentiment_category_group": {"positive": 30}},
        "tripadvisor_sentiment": {"average_sentiment": 0, "detailed_sentiments": []},
        "emotions": {"positive": 50, "joy": 12, "trust": 20, "fear": 1},
        "recommendations": {
            "owner": [{"title": "Lifts", "recommendation": "Service the lifts", "priority": "Medium"}],
            "customer": []
        },
        "word_cloud": "aGVsbG8=",
        "what_emotions_says": "Guests feel **joy**."
    }"#;

    fn report() -> AnalysisReport {
        serde_json::from_str(REPORT).expect("parse report")
    }

    #[rstest]
    fn decodes_service_report() {
        let report = report();
        assert_eq!(report.location_name, "Queen's Hotel");
        assert_eq!(report.emotions.get("joy"), Some(12));
        assert_eq!(report.recommendations.owner.len(), 1);
        assert_eq!(report.word_cloud.decode().expect("valid base64"), b"hello");
    }

    #[rstest]
    fn overall_falls_back_to_google_without_tripadvisor() {
        let overall = report().overall_score().expect("score present");
        assert!((overall.value() - 0.42).abs() < 1e-9);
    }

    #[rstest]
    fn overall_prefers_service_figure() {
        let mut report = report();
        report.overall_sentiment = Some(-0.3);
        let overall = report.overall_score().expect("score present");
        assert!((overall.value() + 0.3).abs() < 1e-9);
    }

    #[rstest]
    fn overall_averages_both_sources() {
        let mut report = report();
        report.tripadvisor_sentiment.average_sentiment = 0.2;
        let overall = report.overall_score().expect("score present");
        assert!((overall.value() - 0.31).abs() < 1e-9);
    }

    #[rstest]
    fn rejects_invalid_word_cloud() {
        assert!(WordCloud::new("not base64!").decode().is_err());
    }

    #[rstest]
    fn decodes_aspect_rows() {
        let json = r#"[
            {"aspect": "food", "business1_score": 0.6, "business2_score": 0.4, "better_business": 1},
            {"aspect": "staff", "business1_score": 0.5, "business2_score": 0.5, "better_business": "tie"}
        ]"#;
        let rows: Vec<AspectComparison> = serde_json::from_str(json).expect("parse rows");
        assert_eq!(rows.first().map(|r| &r.better_business), Some(&BetterBusiness::Index(1)));
        assert_eq!(
            rows.get(1).map(|r| &r.better_business),
            Some(&BetterBusiness::Named("tie".to_owned()))
        );
    }

    #[rstest]
    #[case("plain text", vec![("plain text", false)])]
    #[case("**all bold**", vec![("all bold", true)])]
    #[case("a **b** c **d**", vec![("a ", false), ("b", true), (" c ", false), ("d", true)])]
    #[case("**one** and **two", vec![("one", true), (" and **two", false)])]
    #[case("", vec![])]
    fn splits_emphasis(#[case] text: &str, #[case] expected: Vec<(&str, bool)>) {
        let actual: Vec<(String, bool)> = emphasis_segments(text)
            .into_iter()
            .map(|s| (s.text, s.bold))
            .collect();
        let expected: Vec<(String, bool)> = expected
            .into_iter()
            .map(|(t, b)| (t.to_owned(), b))
            .collect();
        assert_eq!(actual, expected);
    }
}
