//! Recommendation checklists.
//!
//! Lists are immutable: toggling an item yields a new list and leaves the
//! original untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Urgency attached to a recommendation by the analytics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Act first.
    High,
    /// Act soon.
    Medium,
    /// Nice to have.
    Low,
}

impl Priority {
    /// Label as sent by the analytics service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("unknown priority '{s}'")),
        }
    }
}

/// One actionable recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short heading.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub recommendation: String,
    /// Urgency, when the service supplied one.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Whether the user has ticked the item off.
    #[serde(default)]
    pub checked: bool,
}

impl Recommendation {
    /// Construct an unchecked recommendation.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>, priority: Option<Priority>) -> Self {
        Self {
            title: title.into(),
            recommendation: text.into(),
            priority,
            checked: false,
        }
    }
}

/// Errors returned when updating a [`RecommendationList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecommendationError {
    /// The requested position does not exist.
    #[error("recommendation index {index} is out of range for a list of {len}")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the list.
        len: usize,
    },
}

/// An ordered, immutable recommendation checklist.
///
/// # Examples
/// ```
/// use placesense_core::{Priority, Recommendation, RecommendationList};
///
/// let list = RecommendationList::new(vec![
///     Recommendation::new("Fix Wi-Fi", "Guests report drops", Some(Priority::High)),
///     Recommendation::new("Menu", "Add vegan options", Some(Priority::Low)),
/// ]);
/// let updated = list.toggled(0).expect("index exists");
/// assert!(updated.items()[0].checked);
/// assert!(!list.items()[0].checked);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationList {
    items: Vec<Recommendation>,
}

impl RecommendationList {
    /// Wrap a sequence of recommendations.
    #[must_use]
    pub const fn new(items: Vec<Recommendation>) -> Self {
        Self { items }
    }

    /// Borrow the items in display order.
    #[must_use]
    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return a copy with the `checked` flag at `index` flipped.
    ///
    /// # Errors
    /// Returns [`RecommendationError::IndexOutOfRange`] when `index` is not a
    /// valid position.
    pub fn toggled(&self, index: usize) -> Result<Self, RecommendationError> {
        if index >= self.items.len() {
            return Err(RecommendationError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let mut copy = item.clone();
                if position == index {
                    copy.checked = !copy.checked;
                }
                copy
            })
            .collect();
        Ok(Self { items })
    }

    /// Return a copy ordered High, Medium, Low, then unprioritised.
    ///
    /// Items with equal priority keep their relative order.
    #[must_use]
    pub fn by_priority(&self) -> Self {
        let mut items = self.items.clone();
        items.sort_by_key(|item| item.priority.map_or(u8::MAX, |p| p as u8));
        Self { items }
    }

    /// Count of checked items.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}

impl FromIterator<Recommendation> for RecommendationList {
    fn from_iter<I: IntoIterator<Item = Recommendation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
