//! ONNX Classifier - ONNX Runtime Integration
//!
//! Expects the layout of an exported tree-ensemble classifier with the
//! zipmap disabled: output 0 = int64 labels, output 1 = float probabilities
//! `[1, n_classes]`. Input is a single float tensor `[1, n_features]`.

use std::path::Path;

use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::constants::HOURS_PER_DAY;
use super::classifier::{check_width, Classifier};
use super::error::InferenceError;

/// Label encoding used when no sidecar says otherwise
pub const DEFAULT_CLASSES: [i64; 2] = [1, 2];

/// Optional `<model>.onnx.json` next to the artifact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnnxSidecar {
    pub classes: Option<Vec<i64>>,
    pub n_features: Option<usize>,
}

impl OnnxSidecar {
    /// Read the sidecar if present; absent file means defaults
    pub fn load_for(model_path: &Path) -> Result<Self, InferenceError> {
        let mut name = model_path.as_os_str().to_owned();
        name.push(".json");
        let sidecar_path = std::path::PathBuf::from(name);

        if !sidecar_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&sidecar_path)
            .map_err(|source| InferenceError::Io { path: sidecar_path.clone(), source })?;
        let sidecar: OnnxSidecar = serde_json::from_str(&content)
            .map_err(|e| InferenceError::InvalidModel(format!("Failed to parse metadata: {}", e)))?;

        log::info!("Model metadata loaded from: {}", sidecar_path.display());
        Ok(sidecar)
    }
}

/// ONNX session plus the output names it was loaded with
pub struct OnnxClassifier {
    session: Mutex<Session>,
    label_output: String,
    proba_output: String,
    classes: Vec<i64>,
    n_features: usize,
}

impl OnnxClassifier {
    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| InferenceError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| InferenceError::InvalidModel(format!("Failed to load model: {}", e)))?;

        if session.outputs.len() < 2 {
            return Err(InferenceError::InvalidModel(format!(
                "Expected label and probability outputs, model has {}",
                session.outputs.len()
            )));
        }
        let label_output = session.outputs[0].name.clone();
        let proba_output = session.outputs[1].name.clone();

        let sidecar = OnnxSidecar::load_for(path)?;
        let classes = sidecar.classes.unwrap_or_else(|| DEFAULT_CLASSES.to_vec());
        if classes.len() < 2 {
            return Err(InferenceError::InvalidModel(
                "Metadata lists fewer than two classes".to_string(),
            ));
        }

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            proba_output,
            classes,
            n_features: sidecar.n_features.unwrap_or(HOURS_PER_DAY),
        })
    }

    fn input_tensor(&self, features: &[f32]) -> Result<Value, InferenceError> {
        check_width(self, features)?;
        let array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("Array error: {}", e)))?;
        let tensor = Value::from_array(array)
            .map_err(|e| InferenceError::Runtime(format!("Tensor error: {}", e)))?;
        Ok(tensor.into_dyn())
    }
}

impl Classifier for OnnxClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f32]) -> Result<i64, InferenceError> {
        let input = self.input_tensor(features)?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input])
            .map_err(|e| InferenceError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.label_output.as_str())
            .ok_or_else(|| InferenceError::MalformedOutput("No label output".to_string()))?;
        let (_, labels) = output.try_extract_tensor::<i64>()
            .map_err(|e| InferenceError::MalformedOutput(format!("Extract error: {}", e)))?;

        labels.first()
            .copied()
            .ok_or_else(|| InferenceError::MalformedOutput("Empty label tensor".to_string()))
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        let input = self.input_tensor(features)?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input])
            .map_err(|e| InferenceError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.proba_output.as_str())
            .ok_or_else(|| InferenceError::MalformedOutput("No probability output".to_string()))?;
        let (_, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::MalformedOutput(format!("Extract error: {}", e)))?;

        Ok(data.to_vec())
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sidecar_defaults_when_missing() {
        let dir = tempdir().unwrap();
        let sidecar = OnnxSidecar::load_for(&dir.path().join("model.onnx")).unwrap();
        assert!(sidecar.classes.is_none());
        assert!(sidecar.n_features.is_none());
    }

    #[test]
    fn test_sidecar_is_read() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        std::fs::write(dir.path().join("model.onnx.json"), r#"{"classes": [2, 1], "n_features": 24}"#).unwrap();

        let sidecar = OnnxSidecar::load_for(&model).unwrap();
        assert_eq!(sidecar.classes, Some(vec![2, 1]));
        assert_eq!(sidecar.n_features, Some(24));
    }

    #[test]
    fn test_garbage_onnx_is_rejected() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        std::fs::write(&model, b"definitely not a protobuf").unwrap();
        assert!(OnnxClassifier::from_file(&model).is_err());
    }
}
