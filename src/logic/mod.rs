//! Logic Module - form state and inference
//!
//! - `profile` / `presets` / `input_state` - the 24 hourly inputs
//! - `chart` - plot data for the current inputs
//! - `model/` - classifier loading and inference

pub mod chart;
pub mod error;
pub mod input_state;
pub mod presets;
pub mod profile;

pub mod model;

pub use error::ProfileError;
