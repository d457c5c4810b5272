//! Error types for model loading and inference.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for the model loader and the inference engine.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The artifact does not exist at the given path.
    #[error("Model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// None of the default locations holds an artifact.
    #[error("No model found in any of: {}", format_paths(.0))]
    NoModelCandidates(Vec<PathBuf>),

    /// Reading the artifact or a sidecar failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact does not match its `.sha256` sidecar.
    #[error("Checksum mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// File extension (or build feature) not supported.
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    /// Artifact parsed but is structurally unusable.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Input width does not match what the classifier expects.
    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    FeatureMismatch {
        expected: usize,
        actual: usize,
    },

    /// The runtime failed while executing the model.
    #[error("Inference runtime error: {0}")]
    Runtime(String),

    /// The classifier returned something outside its contract.
    #[error("Malformed classifier output: {0}")]
    MalformedOutput(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths.iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
