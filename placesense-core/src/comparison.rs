//! Nearby place comparison.
//!
//! A focal place is compared against candidates sharing one of its
//! categories. Candidates are ordered by rating, highest first, and three
//! tiers are cut independently from that order, so a candidate may land in
//! both `lower` and `similar`.
//!
//! The best-place rule recommends the top candidate only when it does *not*
//! beat the focal rating. The asymmetry is reproduced as-is.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Place;

const DEFAULT_TIER_CAPACITY: usize = 2;
const DEFAULT_SIMILARITY_TOLERANCE: f64 = 0.2;

/// The place a comparison is anchored to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocalPlace {
    /// Rating of the focal place; missing ratings are recorded as `0.0`.
    pub rating: f64,
    /// Category tags candidates must overlap with.
    pub categories: BTreeSet<String>,
}

impl FocalPlace {
    /// Construct a focal place from its rating and categories.
    #[must_use]
    pub fn new<I, S>(rating: f64, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rating,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&Place> for FocalPlace {
    fn from(place: &Place) -> Self {
        Self {
            rating: place.effective_rating(),
            categories: place.categories.clone(),
        }
    }
}

/// Tunable limits applied by [`PlaceComparator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonPolicy {
    /// Maximum number of places kept in each tier.
    pub tier_capacity: usize,
    /// Largest rating difference still counted as similar.
    pub similarity_tolerance: f64,
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        Self {
            tier_capacity: DEFAULT_TIER_CAPACITY,
            similarity_tolerance: DEFAULT_SIMILARITY_TOLERANCE,
        }
    }
}

/// Errors returned by [`ComparisonPolicy::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComparisonPolicyError {
    /// Tiers must hold at least one place.
    #[error("tier capacity must be at least 1")]
    ZeroCapacity,
    /// The tolerance was negative, NaN or infinite.
    #[error("similarity tolerance must be a finite, non-negative number")]
    InvalidTolerance,
}

impl ComparisonPolicy {
    /// Validate the policy and return a copy.
    ///
    /// # Errors
    /// Returns [`ComparisonPolicyError`] for a zero capacity or an unusable
    /// tolerance.
    pub fn validate(self) -> Result<Self, ComparisonPolicyError> {
        if self.tier_capacity == 0 {
            return Err(ComparisonPolicyError::ZeroCapacity);
        }
        if !self.similarity_tolerance.is_finite() || self.similarity_tolerance < 0.0 {
            return Err(ComparisonPolicyError::InvalidTolerance);
        }
        Ok(self)
    }
}

/// Tiers and recommendation derived from one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    higher: Vec<Place>,
    lower: Vec<Place>,
    similar: Vec<Place>,
    best_place: Option<Place>,
}

impl ComparisonResult {
    /// Candidates rated above the focal place, highest first.
    #[must_use]
    pub fn higher(&self) -> &[Place] {
        &self.higher
    }

    /// Candidates rated below the focal place, closest first.
    #[must_use]
    pub fn lower(&self) -> &[Place] {
        &self.lower
    }

    /// Candidates within the similarity tolerance but not equal to it.
    #[must_use]
    pub fn similar(&self) -> &[Place] {
        &self.similar
    }

    /// The recommended place, if the policy produced one.
    #[must_use]
    pub const fn best_place(&self) -> Option<&Place> {
        self.best_place.as_ref()
    }

    fn has_tiers(&self) -> bool {
        !(self.higher.is_empty() && self.lower.is_empty() && self.similar.is_empty())
    }
}

/// Why a comparison produced nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoComparableReason {
    /// No candidate shared a category with the focal place.
    NoCandidatesInCategory,
    /// Candidates exist but every one matches the focal rating exactly.
    AllRatedIdentically,
}

/// Result of [`PlaceComparator::compare`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComparisonOutcome {
    /// At least one tier is populated.
    Found(ComparisonResult),
    /// Nothing comparable was found.
    NoComparablePlaces(NoComparableReason),
}

impl ComparisonOutcome {
    /// Borrow the result when one was found.
    #[must_use]
    pub const fn result(&self) -> Option<&ComparisonResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NoComparablePlaces(_) => None,
        }
    }
}

/// Partition candidates relative to a focal place.
///
/// # Examples
/// ```
/// use placesense_core::{FocalPlace, Place, PlaceComparator, PlaceId};
///
/// let place = |id: &str, rating: f64| {
///     Place::new(PlaceId::new(id).expect("valid id"), id)
///         .with_rating(rating)
///         .with_category("lodging")
/// };
/// let focal = FocalPlace::new(4.0, ["lodging"]);
/// let candidates = [place("a", 4.6), place("b", 3.9), place("c", 4.0)];
///
/// let outcome = PlaceComparator::default().compare(&focal, &candidates);
/// let result = outcome.result().expect("tiers populated");
/// assert_eq!(result.higher().len(), 1);
/// assert_eq!(result.lower().len(), 1);
/// assert_eq!(result.similar().len(), 1);
/// assert!(result.best_place().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaceComparator {
    policy: ComparisonPolicy,
}

impl PlaceComparator {
    /// Build a comparator from a validated policy.
    ///
    /// # Errors
    /// Propagates [`ComparisonPolicy::validate`] failures.
    pub fn new(policy: ComparisonPolicy) -> Result<Self, ComparisonPolicyError> {
        Ok(Self {
            policy: policy.validate()?,
        })
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> ComparisonPolicy {
        self.policy
    }

    /// Compare `candidates` against `focal`.
    #[must_use]
    pub fn compare(&self, focal: &FocalPlace, candidates: &[Place]) -> ComparisonOutcome {
        let mut ranked: Vec<&Place> = candidates
            .iter()
            .filter(|place| place.shares_category(&focal.categories))
            .collect();
        if ranked.is_empty() {
            return ComparisonOutcome::NoComparablePlaces(
                NoComparableReason::NoCandidatesInCategory,
            );
        }
        // Stable, so equal ratings keep the provider's order.
        ranked.sort_by(|a, b| b.effective_rating().total_cmp(&a.effective_rating()));

        let higher = self.tier(&ranked, |rating| rating > focal.rating);
        let lower = self.tier(&ranked, |rating| rating < focal.rating);
        let similar = self.tier(&ranked, |rating| self.is_similar(rating, focal.rating));
        let best_place = ranked
            .first()
            .filter(|top| top.effective_rating() <= focal.rating)
            .map(|top| (*top).clone());

        let result = ComparisonResult {
            higher,
            lower,
            similar,
            best_place,
        };
        if result.has_tiers() {
            ComparisonOutcome::Found(result)
        } else {
            ComparisonOutcome::NoComparablePlaces(NoComparableReason::AllRatedIdentically)
        }
    }

    fn tier(&self, ranked: &[&Place], keep: impl Fn(f64) -> bool) -> Vec<Place> {
        ranked
            .iter()
            .filter(|place| keep(place.effective_rating()))
            .take(self.policy.tier_capacity)
            .map(|place| (*place).clone())
            .collect()
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::float_cmp,
        reason = "similarity is an absolute rating difference with an exact-equality guard"
    )]
    fn is_similar(&self, rating: f64, focal: f64) -> bool {
        (rating - focal).abs() <= self.policy.similarity_tolerance && rating != focal
    }
}

/// Compare with the default policy.
#[must_use]
pub fn compare(focal: &FocalPlace, candidates: &[Place]) -> ComparisonOutcome {
    PlaceComparator::default().compare(focal, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaceId;
    use rstest::{fixture, rstest};

    fn place(id: &str, rating: Option<f64>, category: &str) -> Place {
        let mut place =
            Place::new(PlaceId::new(id).expect("valid id"), id).with_category(category);
        place.rating = rating;
        place
    }

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[fixture]
    fn lodging_focal() -> FocalPlace {
        FocalPlace::new(4.0, ["lodging"])
    }

    #[rstest]
    fn partitions_mixed_candidates(lodging_focal: FocalPlace) {
        let candidates = [
            place("a", Some(4.6), "lodging"),
            place("b", Some(3.9), "lodging"),
            place("c", Some(4.0), "lodging"),
            place("d", Some(4.7), "cafe"),
        ];
        let outcome = compare(&lodging_focal, &candidates);
        let result = outcome.result().expect("tiers populated");
        assert_eq!(ids(result.higher()), ["a"]);
        assert_eq!(ids(result.lower()), ["b"]);
        // 3.9 is within 0.2 of 4.0, so it is also similar.
        assert_eq!(ids(result.similar()), ["b"]);
        assert!(result.best_place().is_none());
    }

    #[rstest]
    fn recommends_top_when_not_better(lodging_focal: FocalPlace) {
        let candidates = [
            place("a", Some(3.5), "lodging"),
            place("b", Some(3.5), "lodging"),
        ];
        let outcome = compare(&lodging_focal, &candidates);
        let result = outcome.result().expect("tiers populated");
        assert!(result.higher().is_empty());
        assert_eq!(ids(result.lower()), ["a", "b"]);
        assert!(result.similar().is_empty());
        assert_eq!(result.best_place().map(|p| p.id.as_str()), Some("a"));
    }

    #[rstest]
    fn lower_tier_holds_the_least_below(lodging_focal: FocalPlace) {
        let candidates = [
            place("low", Some(1.0), "lodging"),
            place("mid", Some(3.0), "lodging"),
            place("near", Some(3.8), "lodging"),
        ];
        let outcome = compare(&lodging_focal, &candidates);
        let result = outcome.result().expect("tiers populated");
        assert_eq!(ids(result.lower()), ["near", "mid"]);
    }

    #[rstest]
    fn missing_rating_counts_as_zero(lodging_focal: FocalPlace) {
        let candidates = [place("unrated", None, "lodging")];
        let outcome = compare(&lodging_focal, &candidates);
        let result = outcome.result().expect("tiers populated");
        assert_eq!(ids(result.lower()), ["unrated"]);
        assert_eq!(
            result.best_place().map(|p| p.id.as_str()),
            Some("unrated")
        );
    }

    #[rstest]
    fn no_shared_category_is_reported(lodging_focal: FocalPlace) {
        let candidates = [place("cafe", Some(4.5), "cafe")];
        assert_eq!(
            compare(&lodging_focal, &candidates),
            ComparisonOutcome::NoComparablePlaces(NoComparableReason::NoCandidatesInCategory)
        );
        assert_eq!(
            compare(&lodging_focal, &[]),
            ComparisonOutcome::NoComparablePlaces(NoComparableReason::NoCandidatesInCategory)
        );
    }

    #[rstest]
    fn identical_ratings_are_distinguished_from_no_data(lodging_focal: FocalPlace) {
        let candidates = [place("twin", Some(4.0), "lodging")];
        assert_eq!(
            compare(&lodging_focal, &candidates),
            ComparisonOutcome::NoComparablePlaces(NoComparableReason::AllRatedIdentically)
        );
    }

    #[rstest]
    fn tiers_respect_capacity(lodging_focal: FocalPlace) {
        let candidates: Vec<Place> = (0..5)
            .map(|n| place(&format!("h{n}"), Some(4.5), "lodging"))
            .collect();
        let outcome = compare(&lodging_focal, &candidates);
        let result = outcome.result().expect("tiers populated");
        assert_eq!(ids(result.higher()), ["h0", "h1"]);
    }

    #[rstest]
    fn custom_capacity_is_applied(lodging_focal: FocalPlace) {
        let policy = ComparisonPolicy {
            tier_capacity: 3,
            ..ComparisonPolicy::default()
        };
        let comparator = PlaceComparator::new(policy).expect("valid policy");
        let candidates: Vec<Place> = (0..5)
            .map(|n| place(&format!("h{n}"), Some(4.5), "lodging"))
            .collect();
        let outcome = comparator.compare(&lodging_focal, &candidates);
        assert_eq!(outcome.result().map(|r| r.higher().len()), Some(3));
    }

    #[rstest]
    #[case(ComparisonPolicy { tier_capacity: 0, similarity_tolerance: 0.2 }, ComparisonPolicyError::ZeroCapacity)]
    #[case(ComparisonPolicy { tier_capacity: 2, similarity_tolerance: -0.1 }, ComparisonPolicyError::InvalidTolerance)]
    #[case(ComparisonPolicy { tier_capacity: 2, similarity_tolerance: f64::NAN }, ComparisonPolicyError::InvalidTolerance)]
    fn rejects_invalid_policy(#[case] policy: ComparisonPolicy, #[case] expected: ComparisonPolicyError) {
        assert_eq!(PlaceComparator::new(policy), Err(expected));
    }

    #[rstest]
    fn focal_from_unrated_place_uses_zero() {
        let selected = place("focal", None, "lodging");
        let focal = FocalPlace::from(&selected);
        assert_eq!(focal.rating, 0.0);
        assert!(focal.categories.contains("lodging"));
    }
}
