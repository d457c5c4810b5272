//! Model Loader
//!
//! Existence check, optional checksum check, then dispatch on extension.
//! Called once by the entry point; the result is injected into the app state.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::constants::HOURS_PER_DAY;
use super::classifier::Classifier;
use super::error::InferenceError;
use super::forest::ForestClassifier;
use super::inference::{InferenceEngine, ModelMetadata};

/// Loader options
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Check `<artifact>.sha256` when it exists
    pub verify_checksum: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { verify_checksum: true }
    }
}

/// Load a model with default options
pub fn load_model(path: &Path) -> Result<InferenceEngine, InferenceError> {
    load_model_with(path, &LoadOptions::default())
}

/// Load a model and wrap it in an inference engine
pub fn load_model_with(path: &Path, options: &LoadOptions) -> Result<InferenceEngine, InferenceError> {
    log::info!("Loading model from: {}", path.display());

    if !path.exists() {
        return Err(InferenceError::ModelNotFound(path.to_path_buf()));
    }

    let sha256 = file_sha256(path)?;
    if options.verify_checksum {
        verify_checksum(path, &sha256)?;
    }

    let classifier = open_classifier(path)?;

    if classifier.n_features() != HOURS_PER_DAY {
        return Err(InferenceError::FeatureMismatch {
            expected: HOURS_PER_DAY,
            actual: classifier.n_features(),
        });
    }

    let metadata = ModelMetadata {
        model_path: path.display().to_string(),
        backend: classifier.backend().to_string(),
        classes: classifier.classes().to_vec(),
        features: classifier.n_features(),
        sha256,
        loaded_at: chrono::Utc::now(),
    };

    log::info!(
        "Model loaded successfully ({} backend, classes {:?})",
        metadata.backend, metadata.classes
    );

    Ok(InferenceEngine::new(classifier, metadata))
}

fn open_classifier(path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
    let extension = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(Box::new(ForestClassifier::from_file(path)?)),
        #[cfg(feature = "onnx")]
        "onnx" => Ok(Box::new(super::onnx::OnnxClassifier::from_file(path)?)),
        #[cfg(not(feature = "onnx"))]
        "onnx" => Err(InferenceError::UnsupportedFormat(
            "onnx (built without the `onnx` feature)".to_string(),
        )),
        other => Err(InferenceError::UnsupportedFormat(format!("'.{}'", other))),
    }
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// Hex SHA-256 of a file
pub fn file_sha256(path: &Path) -> Result<String, InferenceError> {
    let bytes = std::fs::read(path)
        .map_err(|source| InferenceError::Io { path: path.to_path_buf(), source })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// `<artifact>.sha256`
pub fn checksum_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

/// Compare against the sidecar if one exists.
/// Sidecar format: the hex digest, optionally followed by whitespace and a file name.
pub fn verify_checksum(path: &Path, actual: &str) -> Result<(), InferenceError> {
    let sidecar = checksum_path(path);
    if !sidecar.exists() {
        log::debug!("No checksum sidecar for {}", path.display());
        return Ok(());
    }

    let content = std::fs::read_to_string(&sidecar)
        .map_err(|source| InferenceError::Io { path: sidecar.clone(), source })?;
    let expected = content.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if expected != actual {
        return Err(InferenceError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual: actual.to_string(),
        });
    }

    log::info!("Model checksum verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = tempdir().unwrap();
        let err = load_model(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, InferenceError::ModelNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.pkl");
        std::fs::write(&path, b"pickle bytes").unwrap();
        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, InferenceError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_sha256_of_known_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(
            file_sha256(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_checksum_sidecar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, b"abc").unwrap();
        let digest = file_sha256(&path).unwrap();

        // no sidecar -> accepted
        assert!(verify_checksum(&path, &digest).is_ok());

        std::fs::write(checksum_path(&path), format!("{}  a.bin\n", digest.to_uppercase())).unwrap();
        assert!(verify_checksum(&path, &digest).is_ok());

        std::fs::write(checksum_path(&path), "00".repeat(32)).unwrap();
        let err = verify_checksum(&path, &digest).unwrap_err();
        assert!(matches!(err, InferenceError::ChecksumMismatch { .. }));
    }
}
