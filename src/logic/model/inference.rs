//! Inference Engine - classifier adapter
//!
//! Forwards a profile to the loaded classifier and maps the raw output to a
//! day type plus a confidence percentage.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::constants::HOURS_PER_DAY;
use crate::logic::profile::HourlyProfile;
use super::classifier::Classifier;
use super::error::InferenceError;

/// Slack allowed when checking that probabilities sum to 1
const PROBABILITY_SUM_TOLERANCE: f32 = 1e-3;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Result class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Classifier label encoding: 1 = weekend, 2 = weekday
    pub fn from_class_label(label: i64) -> Option<DayType> {
        match label {
            1 => Some(DayType::Weekend),
            2 => Some(DayType::Weekday),
            _ => None,
        }
    }

    pub fn class_label(&self) -> i64 {
        match self {
            DayType::Weekend => 1,
            DayType::Weekday => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DayType::Weekday => "Working-day activity pattern detected.",
            DayType::Weekend => "Leisure / holiday pattern detected.",
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability of one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassProbability {
    pub class_label: i64,
    pub day_type: Option<DayType>,
    pub probability: f32,
}

/// Prediction output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub day_type: DayType,
    pub class_label: i64,
    pub label: String,
    pub description: String,
    /// Max class probability, as a percentage (0-100)
    pub confidence: f32,
    pub probabilities: Vec<ClassProbability>,
    pub inference_time_us: u64,
    pub backend: String,
}

impl ClassificationResult {
    /// "87.50%"
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence)
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub backend: String,
    pub classes: Vec<i64>,
    pub features: usize,
    pub sha256: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine Status for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub backend: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
    pub error_count: u64,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Loaded classifier plus call statistics
pub struct InferenceEngine {
    classifier: Box<dyn Classifier>,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    error_count: AtomicU64,
}

impl InferenceEngine {
    pub fn new(classifier: Box<dyn Classifier>, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            metadata,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Classify one day profile
    pub fn classify(&self, profile: &HourlyProfile) -> Result<ClassificationResult, InferenceError> {
        let result = self.run(profile);
        match &result {
            Ok(r) => {
                self.latency_sum_us.fetch_add(r.inference_time_us, Ordering::Relaxed);
                self.inference_count.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "Classified as {} ({}) in {}us",
                    r.day_type, r.confidence_display(), r.inference_time_us
                );
            }
            Err(e) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                log::error!("Classification failed: {}", e);
            }
        }
        result
    }

    fn run(&self, profile: &HourlyProfile) -> Result<ClassificationResult, InferenceError> {
        let start_time = std::time::Instant::now();

        let features = profile.to_features();
        if features.len() != HOURS_PER_DAY || features.len() != self.classifier.n_features() {
            return Err(InferenceError::FeatureMismatch {
                expected: self.classifier.n_features(),
                actual: features.len(),
            });
        }

        let class_label = self.classifier.predict(&features)?;
        let probabilities = self.classifier.predict_proba(&features)?;
        let classes = self.classifier.classes();

        check_probabilities(&probabilities, classes.len())?;

        let day_type = DayType::from_class_label(class_label)
            .ok_or_else(|| InferenceError::MalformedOutput(format!(
                "Unexpected class label {} (expected 1 or 2)", class_label
            )))?;

        let max_probability = probabilities.iter().copied().fold(0.0f32, f32::max);
        let confidence = (max_probability * 100.0).clamp(0.0, 100.0);

        let probabilities = classes.iter()
            .zip(&probabilities)
            .map(|(&label, &probability)| ClassProbability {
                class_label: label,
                day_type: DayType::from_class_label(label),
                probability,
            })
            .collect();

        Ok(ClassificationResult {
            day_type,
            class_label,
            label: day_type.as_str().to_string(),
            description: day_type.description().to_string(),
            confidence,
            probabilities,
            inference_time_us: start_time.elapsed().as_micros() as u64,
            backend: self.classifier.backend().to_string(),
        })
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            model_name: self.metadata.model_path.clone(),
            backend: self.metadata.backend.clone(),
            avg_latency_ms: avg,
            inference_count: count,
            error_count: self.error_count.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("metadata", &self.metadata)
            .field("inference_count", &self.inference_count.load(Ordering::Relaxed))
            .finish()
    }
}

/// Probability vector must be one finite entry in [0, 1] per class, summing to ~1
fn check_probabilities(probabilities: &[f32], n_classes: usize) -> Result<(), InferenceError> {
    if probabilities.len() != n_classes {
        return Err(InferenceError::MalformedOutput(format!(
            "Expected {} probabilities, got {}", n_classes, probabilities.len()
        )));
    }
    if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0) {
        return Err(InferenceError::MalformedOutput(format!(
            "Probabilities outside [0, 1]: {:?}", probabilities
        )));
    }
    let sum: f32 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(InferenceError::MalformedOutput(format!(
            "Probabilities sum to {}", sum
        )));
    }
    Ok(())
}
