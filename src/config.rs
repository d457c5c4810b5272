//! Configuration module

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_DIR_NAME, DEFAULT_MODEL_DIR, DEFAULT_MODEL_FILE, DEFAULT_ONNX_MODEL_FILE,
    ENV_MODEL_PATH, ENV_VERIFY_CHECKSUM,
};
use crate::logic::model::{InferenceError, LoadOptions};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Explicit model path; when set, no other location is tried
    pub model_path: Option<PathBuf>,

    /// Locations searched in order when no explicit path is set
    pub model_candidates: Vec<PathBuf>,

    /// Check the `.sha256` sidecar when present
    pub verify_checksum: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_candidates: default_model_candidates(),
            verify_checksum: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: env::var(ENV_MODEL_PATH)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            model_candidates: default_model_candidates(),

            verify_checksum: env::var(ENV_VERIFY_CHECKSUM)
                .map(|s| parse_flag(&s))
                .unwrap_or(true),
        }
    }

    /// Pick the artifact to load
    pub fn resolve_model_path(&self) -> Result<PathBuf, InferenceError> {
        if let Some(path) = &self.model_path {
            return Ok(path.clone());
        }

        self.model_candidates.iter()
            .find(|p| p.exists())
            .cloned()
            .ok_or_else(|| InferenceError::NoModelCandidates(self.model_candidates.clone()))
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions { verify_checksum: self.verify_checksum }
    }
}

/// `./models/<forest>`, `./models/<onnx>`, then the per-user data dir
pub fn default_model_candidates() -> Vec<PathBuf> {
    let local = Path::new(DEFAULT_MODEL_DIR);
    let mut candidates = vec![
        local.join(DEFAULT_MODEL_FILE),
        local.join(DEFAULT_ONNX_MODEL_FILE),
    ];
    if let Some(data_dir) = dirs::data_local_dir() {
        candidates.push(data_dir.join(APP_DIR_NAME).join(DEFAULT_MODEL_DIR).join(DEFAULT_MODEL_FILE));
    }
    candidates
}

/// `false`/`0`/`no`/`off` disable, anything else enables
fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_candidates() {
        let candidates = default_model_candidates();
        assert_eq!(candidates[0], Path::new("models").join("random_forest_model.json"));
        assert_eq!(candidates[1], Path::new("models").join("random_forest_model.onnx"));
    }

    #[test]
    fn test_explicit_path_wins_even_if_missing() {
        let config = AppConfig {
            model_path: Some(PathBuf::from("/nowhere/model.json")),
            ..Default::default()
        };
        assert_eq!(config.resolve_model_path().unwrap(), PathBuf::from("/nowhere/model.json"));
    }

    #[test]
    fn test_first_existing_candidate() {
        let dir = tempdir().unwrap();
        let second = dir.path().join("b.json");
        std::fs::write(&second, "{}").unwrap();

        let config = AppConfig {
            model_path: None,
            model_candidates: vec![dir.path().join("a.json"), second.clone()],
            verify_checksum: true,
        };
        assert_eq!(config.resolve_model_path().unwrap(), second);
    }

    #[test]
    fn test_no_candidate_found() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            model_path: None,
            model_candidates: vec![dir.path().join("a.json")],
            verify_checksum: false,
        };
        let err = config.resolve_model_path().unwrap_err();
        assert!(matches!(err, InferenceError::NoModelCandidates(ref c) if c.len() == 1));
        assert!(!config.load_options().verify_checksum);
    }

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" 0 "));
        assert!(!parse_flag("OFF"));
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
    }
}
