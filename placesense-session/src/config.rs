//! Tunable settings for a dashboard session.

use std::collections::BTreeSet;

use placesense_core::{ComparisonPolicy, ComparisonPolicyError, default_excluded};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_NEARBY_RADIUS_M: u32 = 10_000;
const DEFAULT_NEARBY_KEYWORD: &str = "hotel in kandy";

/// Settings applied by [`Session`](crate::Session).
///
/// Every field has a default, so a partial JSON document is enough.
///
/// # Examples
/// ```
/// use placesense_session::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{"nearby_radius_m": 2500}"#)
///     .expect("parse config");
/// assert_eq!(config.nearby_radius_m, 2500);
/// assert_eq!(config.comparison.tier_capacity, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Radius of the nearby search around the focal place, in metres.
    pub nearby_radius_m: u32,
    /// Keyword sent with nearby searches.
    pub nearby_keyword: String,
    /// Keys ignored when choosing the dominant emotion.
    pub excluded_emotions: BTreeSet<String>,
    /// Limits used when partitioning nearby places.
    pub comparison: ComparisonPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            nearby_radius_m: DEFAULT_NEARBY_RADIUS_M,
            nearby_keyword: DEFAULT_NEARBY_KEYWORD.to_owned(),
            excluded_emotions: default_excluded(),
            comparison: ComparisonPolicy::default(),
        }
    }
}

/// Errors returned by [`SessionConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionConfigError {
    /// The nearby radius was zero.
    #[error("nearby search radius must be positive")]
    ZeroRadius,
    /// The nearby keyword was blank.
    #[error("nearby search keyword must not be empty")]
    EmptyKeyword,
    /// The comparison policy was rejected.
    #[error("invalid comparison policy: {0}")]
    Policy(#[from] ComparisonPolicyError),
}

impl SessionConfig {
    /// Validate the settings and return them.
    ///
    /// # Errors
    /// Returns [`SessionConfigError`] describing the first invalid field.
    pub fn validate(self) -> Result<Self, SessionConfigError> {
        if self.nearby_radius_m == 0 {
            return Err(SessionConfigError::ZeroRadius);
        }
        if self.nearby_keyword.trim().is_empty() {
            return Err(SessionConfigError::EmptyKeyword);
        }
        self.comparison.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[rstest]
    fn defaults_exclude_aggregate_emotions() {
        let config = SessionConfig::default();
        assert!(config.excluded_emotions.contains("positive"));
        assert!(config.excluded_emotions.contains("trust"));
    }

    #[rstest]
    #[case(SessionConfig { nearby_radius_m: 0, ..SessionConfig::default() }, SessionConfigError::ZeroRadius)]
    #[case(SessionConfig { nearby_keyword: " ".to_owned(), ..SessionConfig::default() }, SessionConfigError::EmptyKeyword)]
    #[case(
        SessionConfig {
            comparison: ComparisonPolicy { tier_capacity: 0, similarity_tolerance: 0.2 },
            ..SessionConfig::default()
        },
        SessionConfigError::Policy(ComparisonPolicyError::ZeroCapacity)
    )]
    fn rejects_invalid_settings(#[case] config: SessionConfig, #[case] expected: SessionConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }
}
