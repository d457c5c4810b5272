//! Application state owned by the entry point
//!
//! The engine is loaded once and never mutated. The form values sit behind a
//! lock so a preset is applied in a single write.

use parking_lot::RwLock;

use crate::config::AppConfig;
use crate::logic::input_state::InputState;
use crate::logic::model::{load_model_with, InferenceEngine, InferenceError};

pub struct AppState {
    engine: InferenceEngine,
    inputs: RwLock<InputState>,
}

impl AppState {
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            inputs: RwLock::new(InputState::new()),
        }
    }

    /// Resolve and load the model; any failure here is fatal for the session
    pub fn initialize(config: &AppConfig) -> Result<Self, InferenceError> {
        let path = config.resolve_model_path()?;
        let engine = load_model_with(&path, &config.load_options())?;
        Ok(Self::new(engine))
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn inputs(&self) -> &RwLock<InputState> {
        &self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn config(model_path: Option<PathBuf>, candidates: Vec<PathBuf>) -> AppConfig {
        AppConfig {
            model_path,
            model_candidates: candidates,
            verify_checksum: true,
        }
    }

    #[test]
    fn test_explicit_missing_model_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        // a present candidate must not be used when an explicit path is set
        let candidate = dir.path().join("random_forest_model.json");
        std::fs::write(&candidate, include_str!("../models/random_forest_model.json")).unwrap();

        match AppState::initialize(&config(Some(missing.clone()), vec![candidate])) {
            Err(InferenceError::ModelNotFound(path)) => assert_eq!(path, missing),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("startup must fail without a model"),
        }
    }

    #[test]
    fn test_no_candidate_found_is_fatal() {
        let dir = tempdir().unwrap();
        let candidates = vec![
            dir.path().join("models").join("random_forest_model.json"),
            dir.path().join("models").join("random_forest_model.onnx"),
        ];

        match AppState::initialize(&config(None, candidates.clone())) {
            Err(InferenceError::NoModelCandidates(tried)) => assert_eq!(tried, candidates),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("startup must fail without a model"),
        }
    }

    #[test]
    fn test_first_existing_candidate_is_loaded() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("random_forest_model.json");
        std::fs::write(&present, include_str!("../models/random_forest_model.json")).unwrap();

        let state = match AppState::initialize(&config(None, vec![dir.path().join("missing.json"), present.clone()])) {
            Ok(state) => state,
            Err(e) => panic!("startup failed: {}", e),
        };
        assert_eq!(state.engine().metadata().model_path, present.display().to_string());
        assert_eq!(state.inputs().read().values(), vec![0; 24]);
    }
}
