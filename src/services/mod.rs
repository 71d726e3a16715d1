pub mod catalog;
pub mod scorer;

pub use catalog::{FeatureCatalog, FeatureOption};
pub use scorer::{accuracy, Accuracy, Classifier, RuleScorer, Score, ScoringWeights};
