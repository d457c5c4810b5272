//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment overrides are read in `config.rs`.

/// Number of hourly fields in a day profile (00:00 .. 23:00)
pub const HOURS_PER_DAY: usize = 24;

/// Upper bound for a single hourly pedestrian count
pub const MAX_HOURLY_COUNT: u32 = 5000;

/// Increment used by the number inputs
pub const INPUT_STEP: u32 = 10;

/// Fields shown per time-of-day tab
pub const HOURS_PER_BLOCK: usize = 6;

/// Directory (relative to the working directory) searched for the model
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Default native forest artifact
pub const DEFAULT_MODEL_FILE: &str = "random_forest_model.json";

/// Default ONNX artifact
pub const DEFAULT_ONNX_MODEL_FILE: &str = "random_forest_model.onnx";

/// Env var: explicit model path (disables the candidate search)
pub const ENV_MODEL_PATH: &str = "DAYTYPE_MODEL_PATH";

/// Env var: set to `false`/`0` to skip the `.sha256` sidecar check
pub const ENV_VERIFY_CHECKSUM: &str = "DAYTYPE_VERIFY_CHECKSUM";

/// Default log filter for env_logger
pub const DEFAULT_LOG_FILTER: &str = "info";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Day-Type Classifier";

/// Per-user data directory name under the platform data dir
pub const APP_DIR_NAME: &str = "daytype-classifier";
