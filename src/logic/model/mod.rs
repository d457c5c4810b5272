//! Model Module - classifier loading and inference
//!
//! `loader` opens an artifact once; `inference` adapts the loaded
//! classifier to day profiles. Backends implement `classifier::Classifier`.

pub mod classifier;
pub mod error;
pub mod forest;
pub mod inference;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;


// Re-export common types
pub use classifier::Classifier;
pub use error::InferenceError;
pub use inference::{ClassificationResult, DayType, EngineStatus, InferenceEngine, ModelMetadata};
pub use loader::{load_model, load_model_with, LoadOptions};
