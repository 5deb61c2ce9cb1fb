//! Emotion ranking over intensity vectors.
//!
//! An [`EmotionVector`] maps emotion names to non-negative counts and keeps
//! the order in which keys were inserted (or appeared in JSON). That order is
//! the only tie-break used here: equal intensities keep their original
//! relative position, which is arbitrary but stable.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Keys ignored by [`top_emotion`] callers by default.
///
/// `positive` and `negative` are aggregate polarity counts rather than
/// discrete emotions; `trust` is excluded from the dominant emotion as well.
pub const DEFAULT_EXCLUDED_EMOTIONS: [&str; 3] = ["positive", "negative", "trust"];

/// Name reported when no eligible emotion has a positive intensity.
pub const NO_EMOTION: &str = "None";

/// The fixed vocabulary of discrete emotions eligible for ranked display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Anger.
    Anger,
    /// Anticipation.
    Anticipation,
    /// Disgust.
    Disgust,
    /// Fear.
    Fear,
    /// Joy.
    Joy,
    /// Sadness.
    Sadness,
    /// Surprise.
    Surprise,
    /// Trust.
    Trust,
}

impl Emotion {
    /// Every known emotion in alphabetical order.
    pub const ALL: [Self; 8] = [
        Self::Anger,
        Self::Anticipation,
        Self::Disgust,
        Self::Fear,
        Self::Joy,
        Self::Sadness,
        Self::Surprise,
        Self::Trust,
    ];

    /// Lowercase key as produced by the analytics service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Anticipation => "anticipation",
            Self::Disgust => "disgust",
            Self::Fear => "fear",
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
            Self::Trust => "trust",
        }
    }

    /// Capitalised name for display.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Anger => "Anger",
            Self::Anticipation => "Anticipation",
            Self::Disgust => "Disgust",
            Self::Fear => "Fear",
            Self::Joy => "Joy",
            Self::Sadness => "Sadness",
            Self::Surprise => "Surprise",
            Self::Trust => "Trust",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anger" => Ok(Self::Anger),
            "anticipation" => Ok(Self::Anticipation),
            "disgust" => Ok(Self::Disgust),
            "fear" => Ok(Self::Fear),
            "joy" => Ok(Self::Joy),
            "sadness" => Ok(Self::Sadness),
            "surprise" => Ok(Self::Surprise),
            "trust" => Ok(Self::Trust),
            _ => Err(format!("unknown emotion '{s}'")),
        }
    }
}

/// Insertion-ordered emotion intensities.
///
/// # Examples
/// ```
/// use placesense_core::EmotionVector;
///
/// let vector: EmotionVector = [("joy", 5), ("positive", 9), ("fear", 2)]
///     .into_iter()
///     .collect();
/// assert_eq!(vector.get("joy"), Some(5));
/// assert_eq!(vector.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionVector {
    intensities: IndexMap<String, u32>,
}

impl EmotionVector {
    /// Create an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an intensity.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, intensity: u32) {
        self.intensities.insert(name.into(), intensity);
    }

    /// Add an intensity while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, intensity: u32) -> Self {
        self.insert(name, intensity);
        self
    }

    /// Intensity recorded for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u32> {
        self.intensities.get(name).copied()
    }

    /// Number of entries, unknown keys included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// Report whether the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.intensities
            .iter()
            .map(|(name, intensity)| (name.as_str(), *intensity))
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for EmotionVector {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut vector = Self::new();
        for (name, intensity) in iter {
            vector.insert(name, intensity);
        }
        vector
    }
}

/// Known emotions ordered by descending intensity.
///
/// The sequence is finite and restartable: [`RankedEmotions::iter`] may be
/// called any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankedEmotions {
    entries: Vec<(Emotion, u32)>,
}

impl RankedEmotions {
    /// Iterate over `(emotion, intensity)` pairs, strongest first.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of ranked emotions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no known emotion was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display lines such as `"Joy: 12"`, strongest first.
    pub fn labelled(&self) -> impl Iterator<Item = String> + '_ {
        self.iter()
            .map(|(emotion, intensity)| format!("{}: {intensity}", emotion.display_name()))
    }
}

impl<'a> IntoIterator for &'a RankedEmotions {
    type Item = (Emotion, u32);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (Emotion, u32)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

/// Keep only known emotions and order them by intensity, strongest first.
///
/// Keys match the vocabulary case-insensitively. Ties keep insertion order.
///
/// # Examples
/// ```
/// use placesense_core::{Emotion, EmotionVector, rank_known};
///
/// let vector = EmotionVector::new()
///     .with("fear", 2)
///     .with("positive", 40)
///     .with("joy", 7);
/// let ranked: Vec<_> = rank_known(&vector).iter().collect();
/// assert_eq!(ranked, vec![(Emotion::Joy, 7), (Emotion::Fear, 2)]);
/// ```
#[must_use]
pub fn rank_known(vector: &EmotionVector) -> RankedEmotions {
    let mut entries: Vec<(Emotion, u32)> = vector
        .iter()
        .filter_map(|(name, intensity)| {
            Emotion::from_str(name)
                .ok()
                .map(|emotion| (emotion, intensity))
        })
        .collect();
    // `sort_by` is stable, which preserves insertion order among ties.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    RankedEmotions { entries }
}

/// The single strongest emotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominantEmotion {
    /// Emotion key, or [`NO_EMOTION`] when nothing qualified.
    pub name: String,
    /// Intensity of the winning entry.
    pub intensity: u32,
}

impl DominantEmotion {
    /// The `("None", 0)` sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self {
            name: NO_EMOTION.to_owned(),
            intensity: 0,
        }
    }

    /// Report whether this is the sentinel value.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.intensity == 0 && self.name == NO_EMOTION
    }
}

/// Find the strongest entry whose key is not in `excluded`.
///
/// Entries are scanned in insertion order against a running maximum that
/// starts at the sentinel; only a strictly greater intensity replaces it, so
/// the first-seen entry wins ties and zero intensities never win.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use placesense_core::{EmotionVector, top_emotion};
///
/// let vector = EmotionVector::new()
///     .with("positive", 30)
///     .with("joy", 8)
///     .with("anticipation", 8);
/// let excluded = BTreeSet::from(["positive".to_owned()]);
/// let top = top_emotion(&vector, &excluded);
/// assert_eq!((top.name.as_str(), top.intensity), ("joy", 8));
/// ```
#[must_use]
pub fn top_emotion(vector: &EmotionVector, excluded: &BTreeSet<String>) -> DominantEmotion {
    let mut best = DominantEmotion::none();
    for (name, intensity) in vector.iter() {
        if excluded.contains(name) {
            continue;
        }
        if intensity > best.intensity {
            best = DominantEmotion {
                name: name.to_owned(),
                intensity,
            };
        }
    }
    best
}

/// [`top_emotion`] with [`DEFAULT_EXCLUDED_EMOTIONS`].
#[must_use]
pub fn top_emotion_default(vector: &EmotionVector) -> DominantEmotion {
    top_emotion(vector, &default_excluded())
}

/// [`DEFAULT_EXCLUDED_EMOTIONS`] as an owned set.
#[must_use]
pub fn default_excluded() -> BTreeSet<String> {
    DEFAULT_EXCLUDED_EMOTIONS
        .iter()
        .map(|key| (*key).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn review_emotions() -> EmotionVector {
        EmotionVector::new()
            .with("positive", 42)
            .with("trust", 19)
            .with("joy", 15)
            .with("anticipation", 15)
            .with("negative", 11)
            .with("fear", 3)
            .with("sadness", 4)
    }

    #[rstest]
    fn ranking_drops_unknown_keys(review_emotions: EmotionVector) {
        let ranked = rank_known(&review_emotions);
        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|(emotion, _)| Emotion::ALL.contains(&emotion)));
    }

    #[rstest]
    fn ranking_is_stable_for_ties(review_emotions: EmotionVector) {
        let ranked: Vec<_> = rank_known(&review_emotions).iter().collect();
        assert_eq!(
            ranked,
            vec![
                (Emotion::Trust, 19),
                (Emotion::Joy, 15),
                (Emotion::Anticipation, 15),
                (Emotion::Sadness, 4),
                (Emotion::Fear, 3),
            ]
        );
    }

    #[rstest]
    fn ranking_restarts(review_emotions: EmotionVector) {
        let ranked = rank_known(&review_emotions);
        let first: Vec<_> = ranked.iter().collect();
        let second: Vec<_> = (&ranked).into_iter().collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn ranking_matches_keys_case_insensitively() {
        let vector = EmotionVector::new().with("Joy", 2).with("SURPRISE", 3);
        let ranked: Vec<_> = rank_known(&vector).iter().collect();
        assert_eq!(ranked, vec![(Emotion::Surprise, 3), (Emotion::Joy, 2)]);
    }

    #[rstest]
    fn labelled_lines_capitalise_names(review_emotions: EmotionVector) {
        let first = rank_known(&review_emotions).labelled().next();
        assert_eq!(first.as_deref(), Some("Trust: 19"));
    }

    #[rstest]
    fn top_emotion_skips_default_exclusions(review_emotions: EmotionVector) {
        let top = top_emotion_default(&review_emotions);
        assert_eq!(top.name, "joy");
        assert_eq!(top.intensity, 15);
    }

    #[rstest]
    fn top_emotion_considers_unknown_keys_not_excluded() {
        let vector = EmotionVector::new().with("joy", 2).with("awe", 5);
        let top = top_emotion(&vector, &BTreeSet::new());
        assert_eq!(top.name, "awe");
    }

    #[rstest]
    #[case(EmotionVector::new())]
    #[case(EmotionVector::new().with("positive", 9).with("negative", 3))]
    #[case(EmotionVector::new().with("joy", 0).with("fear", 0))]
    fn top_emotion_returns_sentinel(#[case] vector: EmotionVector) {
        let top = top_emotion_default(&vector);
        assert!(top.is_none());
        assert_eq!(top, DominantEmotion::none());
    }

    #[rstest]
    fn vector_preserves_json_order() {
        let vector: EmotionVector =
            serde_json::from_str(r#"{"surprise":3,"anger":3,"joy":3}"#).expect("parse emotions");
        let ranked: Vec<_> = rank_known(&vector).iter().map(|(e, _)| e).collect();
        assert_eq!(ranked, vec![Emotion::Surprise, Emotion::Anger, Emotion::Joy]);
    }
}
