//! Sentiment classification.
//!
//! Two scales are applied to the same score: a five-bucket
//! [`SentimentLabel`] and a three-bucket alert [`Severity`]. Their
//! thresholds differ on purpose and are never derived from one another.
//!
//! # Examples
//! ```
//! use placesense_core::{SentimentLabel, SentimentScore, Severity, classify};
//!
//! let score = SentimentScore::new(0.3).expect("score in range");
//! let classification = classify(score);
//! assert_eq!(classification.label, SentimentLabel::Positive);
//! assert_eq!(classification.severity, Severity::Success);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const VERY_NEGATIVE_MAX: f64 = -0.5;
const NEGATIVE_MAX: f64 = -0.1;
const NEUTRAL_MAX: f64 = 0.1;
const POSITIVE_MAX: f64 = 0.5;

const SUCCESS_ABOVE: f64 = 0.1;
const DANGER_BELOW: f64 = -0.1;

/// Sentiment polarity in the inclusive range `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SentimentScore(f64);

/// Errors returned by [`SentimentScore::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SentimentScoreError {
    /// The value was NaN or infinite.
    #[error("sentiment score must be finite")]
    NotFinite,
    /// The value fell outside `[-1.0, 1.0]`.
    #[error("sentiment score {0} is outside -1.0..=1.0")]
    OutOfRange(f64),
}

impl SentimentScore {
    /// Validate and wrap a polarity value.
    ///
    /// # Errors
    /// Returns [`SentimentScoreError`] for non-finite or out-of-range input.
    pub fn new(value: f64) -> Result<Self, SentimentScoreError> {
        if !value.is_finite() {
            return Err(SentimentScoreError::NotFinite);
        }
        if !(-1.0..=1.0).contains(&value) {
            return Err(SentimentScoreError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Return the raw polarity.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Combine per-source averages into the overall score.
    ///
    /// The mean of both sources is used when the secondary source has data;
    /// otherwise the primary source stands alone.
    ///
    /// # Examples
    /// ```
    /// use placesense_core::SentimentScore;
    ///
    /// let google = SentimentScore::new(0.4).expect("valid");
    /// let tripadvisor = SentimentScore::new(0.2).expect("valid");
    /// let overall = SentimentScore::overall(google, Some(tripadvisor));
    /// assert!((overall.value() - 0.3).abs() < 1e-9);
    /// assert_eq!(SentimentScore::overall(google, None), google);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the overall score is the arithmetic mean of two sources"
    )]
    pub fn overall(primary: Self, secondary: Option<Self>) -> Self {
        match secondary {
            // The mean of two in-range values stays in range.
            Some(other) => Self((primary.0 + other.0) / 2.0),
            None => primary,
        }
    }
}

impl TryFrom<f64> for SentimentScore {
    type Error = SentimentScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SentimentScore> for f64 {
    fn from(score: SentimentScore) -> Self {
        score.0
    }
}

/// Five-bucket sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Score at or below `-0.5`.
    VeryNegative,
    /// Score in `(-0.5, -0.1]`.
    Negative,
    /// Score in `(-0.1, 0.1]`.
    Neutral,
    /// Score in `(0.1, 0.5]`.
    Positive,
    /// Score above `0.5`.
    VeryPositive,
}

impl SentimentLabel {
    /// Bucket a score on the five-step scale.
    #[must_use]
    pub fn for_score(score: SentimentScore) -> Self {
        let value = score.value();
        if value <= VERY_NEGATIVE_MAX {
            Self::VeryNegative
        } else if value <= NEGATIVE_MAX {
            Self::Negative
        } else if value <= NEUTRAL_MAX {
            Self::Neutral
        } else if value <= POSITIVE_MAX {
            Self::Positive
        } else {
            Self::VeryPositive
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryNegative => "Very Negative",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
            Self::VeryPositive => "Very Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "very negative" => Ok(Self::VeryNegative),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            "very positive" => Ok(Self::VeryPositive),
            _ => Err(format!("unknown sentiment label '{s}'")),
        }
    }
}

/// Alert severity on the coarse three-bucket scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Score above `0.1`.
    Success,
    /// Score below `-0.1`.
    Danger,
    /// Anything in between, bounds included.
    Info,
}

impl Severity {
    /// Bucket a score on the alert scale.
    #[must_use]
    pub fn for_score(score: SentimentScore) -> Self {
        let value = score.value();
        if value > SUCCESS_ABOVE {
            Self::Success
        } else if value < DANGER_BELOW {
            Self::Danger
        } else {
            Self::Info
        }
    }

    /// Alert style identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }

    /// Tone word shown in alert text.
    #[must_use]
    pub const fn tone(self) -> &'static str {
        match self {
            Self::Success => "positive",
            Self::Danger => "negative",
            Self::Info => "neutral",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "danger" => Ok(Self::Danger),
            "info" => Ok(Self::Info),
            _ => Err(format!("unknown severity '{s}'")),
        }
    }
}

/// Label and severity produced for one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Five-bucket label.
    pub label: SentimentLabel,
    /// Three-bucket alert severity.
    pub severity: Severity,
}

impl Classification {
    /// Render the alert sentence for `score`.
    ///
    /// # Examples
    /// ```
    /// use placesense_core::{SentimentScore, classify};
    ///
    /// let score = SentimentScore::new(-0.25).expect("valid");
    /// assert_eq!(
    ///     classify(score).describe(score),
    ///     "The overall sentiment score is -0.25, indicating a negative sentiment."
    /// );
    /// ```
    #[must_use]
    pub fn describe(&self, score: SentimentScore) -> String {
        format!(
            "The overall sentiment score is {:.2}, indicating a {} sentiment.",
            score.value(),
            self.severity.tone()
        )
    }
}

/// Classify a score on both scales.
#[must_use]
pub fn classify(score: SentimentScore) -> Classification {
    Classification {
        label: SentimentLabel::for_score(score),
        severity: Severity::for_score(score),
    }
}

/// Classify an optional score.
///
/// `None` means the caller should render an "N/A" indicator.
#[must_use]
pub fn classify_optional(score: Option<SentimentScore>) -> Option<Classification> {
    score.map(classify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn score(value: f64) -> SentimentScore {
        SentimentScore::new(value).expect("score in range")
    }

    #[rstest]
    #[case(-1.0, SentimentLabel::VeryNegative)]
    #[case(-0.5, SentimentLabel::VeryNegative)]
    #[case(-0.49, SentimentLabel::Negative)]
    #[case(-0.1, SentimentLabel::Negative)]
    #[case(-0.09, SentimentLabel::Neutral)]
    #[case(0.0, SentimentLabel::Neutral)]
    #[case(0.1, SentimentLabel::Neutral)]
    #[case(0.11, SentimentLabel::Positive)]
    #[case(0.5, SentimentLabel::Positive)]
    #[case(0.51, SentimentLabel::VeryPositive)]
    #[case(1.0, SentimentLabel::VeryPositive)]
    fn labels_follow_inclusive_upper_bounds(#[case] value: f64, #[case] expected: SentimentLabel) {
        assert_eq!(SentimentLabel::for_score(score(value)), expected);
    }

    #[rstest]
    #[case(-0.5, Severity::Danger)]
    #[case(-0.11, Severity::Danger)]
    #[case(-0.1, Severity::Info)]
    #[case(0.0, Severity::Info)]
    #[case(0.1, Severity::Info)]
    #[case(0.11, Severity::Success)]
    #[case(0.5, Severity::Success)]
    fn severity_uses_exclusive_bounds(#[case] value: f64, #[case] expected: Severity) {
        assert_eq!(Severity::for_score(score(value)), expected);
    }

    #[rstest]
    fn scales_are_not_collapsed() {
        // -0.1 is "Negative" on the label scale yet "info" on the alert scale.
        let classification = classify(score(-0.1));
        assert_eq!(classification.label, SentimentLabel::Negative);
        assert_eq!(classification.severity, Severity::Info);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_finite(#[case] value: f64) {
        assert_eq!(
            SentimentScore::new(value),
            Err(SentimentScoreError::NotFinite)
        );
    }

    #[rstest]
    #[case(-1.01)]
    #[case(1.5)]
    fn rejects_out_of_range(#[case] value: f64) {
        assert!(matches!(
            SentimentScore::new(value),
            Err(SentimentScoreError::OutOfRange(_))
        ));
    }

    #[rstest]
    fn absent_score_has_no_classification() {
        assert!(classify_optional(None).is_none());
        assert!(classify_optional(Some(score(0.2))).is_some());
    }

    #[rstest]
    fn label_round_trips_through_display() {
        let parsed: SentimentLabel = SentimentLabel::VeryPositive
            .to_string()
            .parse()
            .expect("parse label");
        assert_eq!(parsed, SentimentLabel::VeryPositive);
        assert!("ecstatic".parse::<SentimentLabel>().is_err());
    }

    #[rstest]
    fn describe_uses_tone_and_two_decimals() {
        let value = score(0.456);
        assert_eq!(
            classify(value).describe(value),
            "The overall sentiment score is 0.46, indicating a positive sentiment."
        );
    }
}
