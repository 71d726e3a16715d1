use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{Feature, FeatureVector, RawFeatureVector, WatchLabel};
use crate::services::{Accuracy, FeatureCatalog, FeatureOption};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct FeatureResponse {
    pub feature: Feature,
    pub display_name: &'static str,
    /// Code preselected when a form first opens
    pub default: u8,
    pub options: Vec<FeatureOption>,
}

impl FeatureResponse {
    fn build(catalog: &FeatureCatalog, feature: Feature) -> Self {
        Self {
            feature,
            display_name: feature.display_name(),
            default: catalog.default_selection().get(feature),
            options: catalog.labels_for(feature),
        }
    }
}

/// Label of each submitted feature, keyed by feature name
pub type Selection = BTreeMap<Feature, &'static str>;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// 1 = will watch, 0 = won't watch
    pub prediction: u8,
    pub label: &'static str,
    pub score: f64,
    pub selection: Selection,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResponse {
    pub correct: usize,
    pub total: usize,
    pub percent: f64,
    /// Percentage with one decimal, e.g. "50.0"
    pub display: String,
}

impl From<Accuracy> for AccuracyResponse {
    fn from(accuracy: Accuracy) -> Self {
        Self {
            correct: accuracy.correct,
            total: accuracy.total,
            percent: accuracy.percent(),
            display: accuracy.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DatasetRow {
    /// 1-based position in the dataset
    pub id: usize,
    pub features: FeatureVector,
    pub labels: Selection,
    pub output: u8,
    pub output_label: &'static str,
    pub predicted: u8,
    pub predicted_label: &'static str,
}

fn selection(catalog: &FeatureCatalog, features: &FeatureVector) -> Selection {
    catalog.describe(features).into_iter().collect()
}

fn bit_and_label(label: WatchLabel) -> (u8, &'static str) {
    (label.as_bit(), label.display_name())
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Every feature with its selectable options, in form order
pub async fn list_features(State(state): State<AppState>) -> Json<Vec<FeatureResponse>> {
    let features = Feature::ALL
        .into_iter()
        .map(|feature| FeatureResponse::build(&state.catalog, feature))
        .collect();
    Json(features)
}

/// Options of a single feature
pub async fn get_feature(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<FeatureResponse>> {
    let feature = Feature::from_key(&name)
        .ok_or_else(|| AppError::NotFound(format!("unknown feature: {}", name)))?;
    Ok(Json(FeatureResponse::build(&state.catalog, feature)))
}

/// Classify a single feature vector
pub async fn predict(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RawFeatureVector>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Malformed prediction body");
        e
    })?;
    let features = FeatureVector::try_from(request).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected prediction input");
        e
    })?;

    let score = state.classifier.score(&features);
    let label = state.classifier.classify(&features);

    tracing::info!(
        request_id = %request_id,
        classifier = state.classifier.name(),
        score = %score,
        prediction = %label,
        "Prediction served"
    );

    let (prediction, label) = bit_and_label(label);
    Ok(Json(PredictResponse {
        prediction,
        label,
        score: score.value(),
        selection: selection(&state.catalog, &features),
    }))
}

/// Accuracy on the fixed dataset, as computed at startup
pub async fn get_accuracy(State(state): State<AppState>) -> Json<AccuracyResponse> {
    Json(state.baseline.into())
}

/// The fixed dataset with labels and the current classifier's predictions
pub async fn get_dataset(State(state): State<AppState>) -> Json<Vec<DatasetRow>> {
    let rows = state
        .catalog
        .fixed_dataset()
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let (output, output_label) = bit_and_label(sample.output);
            let (predicted, predicted_label) =
                bit_and_label(state.classifier.classify(&sample.features));
            DatasetRow {
                id: index + 1,
                features: sample.features,
                labels: selection(&state.catalog, &sample.features),
                output,
                output_label,
                predicted,
                predicted_label,
            }
        })
        .collect();
    Json(rows)
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
