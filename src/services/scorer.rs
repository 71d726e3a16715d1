use std::fmt::Display;

use crate::models::{Feature, FeatureVector, LabeledSample, WatchLabel};

/// Weight expressed in ten-thousandths (0.25 == 2_500)
pub type BasisPoints = u32;

const BASIS_POINTS_PER_UNIT: f64 = 10_000.0;

/// Output of a scoring function
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(BasisPoints);

impl Score {
    pub fn from_basis_points(points: BasisPoints) -> Self {
        Self(points)
    }

    pub fn basis_points(self) -> BasisPoints {
        self.0
    }

    /// Real-valued score, e.g. 1.40
    pub fn value(self) -> f64 {
        f64::from(self.0) / BASIS_POINTS_PER_UNIT
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Per-category weights of the rule-based scorer
///
/// Categorical tables are indexed by `code - 1`. The user rating contributes
/// `user_rating * rating / 4`, so it is linear rather than bucketed.
/// The summed score saturates at `u32::MAX` rather than overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub genre: [BasisPoints; 5],
    pub age_rating: [BasisPoints; 5],
    pub length: [BasisPoints; 4],
    pub era: [BasisPoints; 4],
    pub user_rating: BasisPoints,
    /// Scores strictly above this are "will watch"
    pub threshold: BasisPoints,
}

impl ScoringWeights {
    /// The hand-tuned constants of the demo model
    pub const HAND_TUNED: ScoringWeights = ScoringWeights {
        // Action, Comedy, Drama, Romance, Horror
        genre: [3_000, 3_000, 2_000, 2_000, 1_000],
        // PG, PG-13, 16VL, 18+, R
        age_rating: [2_000, 2_500, 2_500, 1_500, 1_500],
        // Short, Medium, Long, Very Long
        length: [1_000, 3_000, 2_000, 1_000],
        // Classic, Retro, Modern, Latest
        era: [1_500, 1_500, 2_500, 2_500],
        user_rating: 4_000,
        threshold: 6_000,
    };
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::HAND_TUNED
    }
}

/// Maps a feature vector to a score and a binary watch decision
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    fn score(&self, features: &FeatureVector) -> Score;

    fn classify(&self, features: &FeatureVector) -> WatchLabel;

    /// Model name for logging
    fn name(&self) -> &'static str;
}

/// Additive rule-based classifier with fixed weights and a strict threshold
///
/// There is no fitting step; the weights are configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleScorer {
    weights: ScoringWeights,
}

impl RuleScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

/// Codes are 1-based and range-checked by `FeatureVector`, so this never goes out of bounds
fn bucket(table: &[BasisPoints], code: u8) -> BasisPoints {
    table[usize::from(code - 1)]
}

impl Classifier for RuleScorer {
    fn score(&self, features: &FeatureVector) -> Score {
        let w = &self.weights;
        let max_rating = u64::from(Feature::UserRating.max_code());
        // rating <= max_rating, so the quotient never exceeds w.user_rating
        let rating = u64::from(w.user_rating) * u64::from(features.user_rating()) / max_rating;
        let rating = BasisPoints::try_from(rating).unwrap_or(BasisPoints::MAX);

        Score(
            [
                bucket(&w.genre, features.genre()),
                bucket(&w.age_rating, features.age_rating()),
                bucket(&w.length, features.length()),
                bucket(&w.era, features.era()),
                rating,
            ]
            .into_iter()
            .fold(0, BasisPoints::saturating_add),
        )
    }

    fn classify(&self, features: &FeatureVector) -> WatchLabel {
        if self.score(features).basis_points() > self.weights.threshold {
            WatchLabel::WillWatch
        } else {
            WatchLabel::WontWatch
        }
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

/// How often a classifier agrees with a labeled dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    /// Percentage of matching samples; an empty dataset reports 0.0
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

impl Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.percent())
    }
}

/// Re-evaluates a classifier against every sample of a dataset
pub fn accuracy(classifier: &dyn Classifier, dataset: &[LabeledSample]) -> Accuracy {
    let correct = dataset
        .iter()
        .filter(|sample| {
            let predicted = classifier.classify(&sample.features);
            if predicted != sample.output {
                tracing::debug!(
                    features = ?sample.features,
                    expected = %sample.output,
                    predicted = %predicted,
                    "Prediction disagrees with sample"
                );
            }
            predicted == sample.output
        })
        .count();

    Accuracy {
        correct,
        total: dataset.len(),
    }
}
