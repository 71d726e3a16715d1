use serde::Serialize;

use crate::models::{Feature, FeatureError, FeatureVector, LabeledSample, WatchLabel};

/// A selectable value of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureOption {
    pub code: u8,
    pub label: &'static str,
}

const GENRE_LABELS: [&str; 5] = ["Action", "Comedy", "Drama", "Romance", "Horror"];
const AGE_RATING_LABELS: [&str; 5] = ["PG", "PG-13", "16VL", "18+", "R"];
const LENGTH_LABELS: [&str; 4] = ["Short", "Medium", "Long", "Very Long"];
const ERA_LABELS: [&str; 4] = ["Classic", "Retro", "Modern", "Latest"];
const USER_RATING_LABELS: [&str; 4] = ["Poor", "Average", "Good", "Excellent"];

const WILL: WatchLabel = WatchLabel::WillWatch;
const WONT: WatchLabel = WatchLabel::WontWatch;

/// Action, PG-13, Medium, Modern, Good
const DEFAULT_SELECTION: [u8; 5] = [1, 2, 2, 3, 3];

/// (genre, age_rating, length, era, user_rating) -> output
const FIXED_DATASET: [([u8; 5], WatchLabel); 20] = [
    // Action
    ([1, 2, 2, 3, 3], WILL),
    ([1, 2, 3, 4, 4], WILL),
    ([1, 5, 2, 2, 1], WONT),
    ([1, 1, 1, 1, 2], WONT),
    // Comedy
    ([2, 2, 2, 3, 3], WILL),
    ([2, 1, 2, 4, 4], WILL),
    ([2, 5, 3, 2, 1], WONT),
    ([2, 3, 4, 1, 2], WONT),
    // Drama
    ([3, 3, 3, 3, 4], WILL),
    ([3, 4, 3, 2, 3], WILL),
    ([3, 2, 2, 4, 1], WONT),
    ([3, 1, 1, 1, 2], WONT),
    // Romance
    ([4, 2, 2, 3, 3], WILL),
    ([4, 1, 2, 4, 4], WILL),
    ([4, 4, 3, 2, 1], WONT),
    ([4, 3, 4, 1, 2], WONT),
    // Horror
    ([5, 5, 2, 3, 3], WILL),
    ([5, 4, 2, 4, 4], WILL),
    ([5, 5, 3, 2, 1], WONT),
    ([5, 3, 2, 1, 2], WONT),
];

/// Label sets for every feature plus the fixed synthetic dataset
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    dataset: Vec<LabeledSample>,
    default_selection: FeatureVector,
}

impl FeatureCatalog {
    /// Builds the catalog, validating every dataset row against the feature ranges
    pub fn new() -> Result<Self, FeatureError> {
        let mut dataset = Vec::with_capacity(FIXED_DATASET.len());
        for ([genre, age_rating, length, era, user_rating], output) in FIXED_DATASET {
            dataset.push(LabeledSample {
                features: FeatureVector::new(genre, age_rating, length, era, user_rating)?,
                output,
            });
        }

        let [genre, age_rating, length, era, user_rating] = DEFAULT_SELECTION;
        let default_selection = FeatureVector::new(genre, age_rating, length, era, user_rating)?;

        Ok(Self {
            dataset,
            default_selection,
        })
    }

    /// Ordered code -> label mapping for a feature
    pub fn labels_for(&self, feature: Feature) -> Vec<FeatureOption> {
        raw_labels(feature)
            .iter()
            .zip(Feature::MIN_CODE..)
            .map(|(label, code)| FeatureOption { code, label: *label })
            .collect()
    }

    /// Display label of a single code, if it is in range
    pub fn label(&self, feature: Feature, code: u8) -> Option<&'static str> {
        let index = code.checked_sub(Feature::MIN_CODE)?;
        raw_labels(feature).get(usize::from(index)).copied()
    }

    /// The 20 fixed samples, in their original order
    pub fn fixed_dataset(&self) -> &[LabeledSample] {
        &self.dataset
    }

    /// Vector a prediction form starts from
    pub fn default_selection(&self) -> FeatureVector {
        self.default_selection
    }

    /// Label of every field of a vector, in form order
    pub fn describe(&self, features: &FeatureVector) -> Vec<(Feature, &'static str)> {
        Feature::ALL
            .into_iter()
            .filter_map(|feature| {
                self.label(feature, features.get(feature))
                    .map(|label| (feature, label))
            })
            .collect()
    }
}

fn raw_labels(feature: Feature) -> &'static [&'static str] {
    match feature {
        Feature::Genre => &GENRE_LABELS,
        Feature::AgeRating => &AGE_RATING_LABELS,
        Feature::Length => &LENGTH_LABELS,
        Feature::Era => &ERA_LABELS,
        Feature::UserRating => &USER_RATING_LABELS,
    }
}
