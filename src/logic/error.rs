//! Error types for the input side: profiles, presets and the form state.

use thiserror::Error;

/// Error raised when building or editing an hourly profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Hour index outside 0..24.
    #[error("Hour out of range: {0} (expected 0-23)")]
    HourOutOfRange(usize),

    /// Profile built from a vector that is not exactly 24 long.
    #[error("Profile length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Strict construction saw a count above the allowed maximum.
    #[error("Value out of range at hour {hour}: {value}")]
    ValueOutOfRange {
        hour: usize,
        value: i64,
    },

    /// Preset lookup with a name that is not in the store.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}
