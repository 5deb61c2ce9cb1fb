//! Star-rating breakdown for display.

use serde::{Deserialize, Serialize};

/// Star count used when no maximum is given.
pub const DEFAULT_MAX_STARS: u8 = 5;

/// Full, half and empty stars for a rating.
///
/// # Examples
/// ```
/// use placesense_core::StarBreakdown;
///
/// let stars = StarBreakdown::new(3.6, 5);
/// assert_eq!((stars.full, stars.half, stars.empty), (3, true, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarBreakdown {
    /// Completely filled stars.
    pub full: u8,
    /// Whether a half star follows the full ones.
    pub half: bool,
    /// Remaining outlined stars.
    pub empty: u8,
}

impl StarBreakdown {
    /// Split `rating` into stars out of `max_stars`.
    ///
    /// The rating is clamped into `0..=max_stars`; non-finite ratings render
    /// as zero stars.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the rating is clamped to 0..=max_stars before truncation"
    )]
    pub fn new(rating: f64, max_stars: u8) -> Self {
        let ceiling = f64::from(max_stars);
        let clamped = if rating.is_finite() {
            rating.clamp(0.0, ceiling)
        } else {
            0.0
        };
        let full = clamped.floor() as u8;
        let half = clamped.fract() >= 0.5;
        let empty = max_stars
            .saturating_sub(full)
            .saturating_sub(u8::from(half));
        Self { full, half, empty }
    }

    /// Total number of star glyphs.
    #[must_use]
    pub const fn total(self) -> u8 {
        self.full + self.half as u8 + self.empty
    }
}

impl From<f64> for StarBreakdown {
    fn from(rating: f64) -> Self {
        Self::new(rating, DEFAULT_MAX_STARS)
    }
}
