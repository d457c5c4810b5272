//! Classifier trait - the two-call inference contract
//!
//! Backends (native forest, ONNX) implement this; the engine only sees the trait.

use super::error::InferenceError;

/// A loaded, read-only classifier
pub trait Classifier: Send + Sync {
    /// Class labels, in the column order of `predict_proba`
    fn classes(&self) -> &[i64];

    /// Number of input features expected
    fn n_features(&self) -> usize;

    /// Predicted class label for one sample
    fn predict(&self, features: &[f32]) -> Result<i64, InferenceError>;

    /// Probability per class for one sample
    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError>;

    /// Backend name for status output ("forest", "onnx")
    fn backend(&self) -> &'static str;
}

/// Reject input whose width differs from the classifier's
pub fn check_width(classifier: &dyn Classifier, features: &[f32]) -> Result<(), InferenceError> {
    if features.len() != classifier.n_features() {
        return Err(InferenceError::FeatureMismatch {
            expected: classifier.n_features(),
            actual: features.len(),
        });
    }
    Ok(())
}
