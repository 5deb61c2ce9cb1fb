//! Behavioural coverage for emotion ranking.

use std::cell::RefCell;

use placesense_core::{
    DominantEmotion, Emotion, EmotionVector, rank_known, top_emotion_default,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[fixture]
fn vector() -> RefCell<EmotionVector> {
    RefCell::new(EmotionVector::new())
}

#[fixture]
fn ranking() -> RefCell<Vec<(Emotion, u32)>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn dominant() -> RefCell<Option<DominantEmotion>> {
    RefCell::new(None)
}

#[given("an emotion vector with positive 40, joy 12, fear 3 and negative 9")]
fn vector_with_aggregates(#[from(vector)] vector: &RefCell<EmotionVector>) {
    vector.replace(
        EmotionVector::new()
            .with("positive", 40)
            .with("joy", 12)
            .with("fear", 3)
            .with("negative", 9),
    );
}

#[given("an emotion vector with positive 40, trust 30, joy 12 and anticipation 12")]
fn vector_with_tie(#[from(vector)] vector: &RefCell<EmotionVector>) {
    vector.replace(
        EmotionVector::new()
            .with("positive", 40)
            .with("trust", 30)
            .with("joy", 12)
            .with("anticipation", 12),
    );
}

#[given("an empty emotion vector")]
fn empty_vector(#[from(vector)] vector: &RefCell<EmotionVector>) {
    vector.replace(EmotionVector::new());
}

#[when("the known emotions are ranked")]
fn rank(
    #[from(vector)] vector: &RefCell<EmotionVector>,
    #[from(ranking)] ranking: &RefCell<Vec<(Emotion, u32)>>,
) {
    ranking.replace(rank_known(&vector.borrow()).iter().collect());
}

#[when("the dominant emotion is chosen")]
fn choose(
    #[from(vector)] vector: &RefCell<EmotionVector>,
    #[from(dominant)] dominant: &RefCell<Option<DominantEmotion>>,
) {
    dominant.replace(Some(top_emotion_default(&vector.borrow())));
}

#[then("the ranking is joy then fear")]
fn ranking_is_joy_then_fear(#[from(ranking)] ranking: &RefCell<Vec<(Emotion, u32)>>) {
    assert_eq!(
        *ranking.borrow(),
        vec![(Emotion::Joy, 12), (Emotion::Fear, 3)]
    );
}

#[then("the dominant emotion is joy with intensity 12")]
fn dominant_is_joy(#[from(dominant)] dominant: &RefCell<Option<DominantEmotion>>) {
    let binding = dominant.borrow();
    let top = binding
        .as_ref()
        .unwrap_or_else(|| panic!("dominant emotion must be recorded"));
    assert_eq!(top.name, "joy");
    assert_eq!(top.intensity, 12);
}

#[then("the dominant emotion is the None sentinel")]
fn dominant_is_sentinel(#[from(dominant)] dominant: &RefCell<Option<DominantEmotion>>) {
    assert_eq!(*dominant.borrow(), Some(DominantEmotion::none()));
}

#[scenario(path = "tests/features/emotions.feature", index = 0)]
fn ranked_display_scenario(
    vector: RefCell<EmotionVector>,
    ranking: RefCell<Vec<(Emotion, u32)>>,
    dominant: RefCell<Option<DominantEmotion>>,
) {
    let _ = (vector, ranking, dominant);
}

#[scenario(path = "tests/features/emotions.feature", index = 1)]
fn dominant_emotion_scenario(
    vector: RefCell<EmotionVector>,
    ranking: RefCell<Vec<(Emotion, u32)>>,
    dominant: RefCell<Option<DominantEmotion>>,
) {
    let _ = (vector, ranking, dominant);
}

#[scenario(path = "tests/features/emotions.feature", index = 2)]
fn empty_vector_scenario(
    vector: RefCell<EmotionVector>,
    ranking: RefCell<Vec<(Emotion, u32)>>,
    dominant: RefCell<Option<DominantEmotion>>,
) {
    let _ = (vector, ranking, dominant);
}
