use std::sync::Arc;

use crate::models::FeatureError;
use crate::services::{accuracy, Accuracy, Classifier, FeatureCatalog, RuleScorer};

/// Shared application state
///
/// Everything here is immutable after startup, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FeatureCatalog>,
    pub classifier: Arc<dyn Classifier>,
    /// Accuracy of `classifier` on the fixed dataset, computed once at startup
    pub baseline: Accuracy,
}

impl AppState {
    /// Wires a catalog and classifier together and evaluates the baseline accuracy
    pub fn with_classifier(catalog: FeatureCatalog, classifier: Arc<dyn Classifier>) -> Self {
        let baseline = accuracy(classifier.as_ref(), catalog.fixed_dataset());

        tracing::info!(
            classifier = classifier.name(),
            correct = baseline.correct,
            total = baseline.total,
            accuracy = %baseline,
            "Baseline accuracy computed"
        );

        Self {
            catalog: Arc::new(catalog),
            classifier,
            baseline,
        }
    }

    /// State backed by the hand-tuned rule scorer
    pub fn new() -> Result<Self, FeatureError> {
        Ok(Self::with_classifier(
            FeatureCatalog::new()?,
            Arc::new(RuleScorer::default()),
        ))
    }
}
