//! Input State - the 24 form fields of one session
//!
//! Plain mutable record with explicit operations. Values are clamped into
//! [0, MAX_HOURLY_COUNT] on write; out-of-range input is never rejected.

use serde::{Deserialize, Serialize};

use crate::constants::HOURS_PER_DAY;
use super::error::ProfileError;
use super::profile::{clamp_count, HourlyProfile};

/// Result of a single-field write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOutcome {
    pub hour: usize,
    pub requested: i64,
    pub stored: u32,
    pub clamped: bool,
}

/// Current values of the form
#[derive(Debug, Clone, Default)]
pub struct InputState {
    profile: HourlyProfile,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hour: usize) -> Result<u32, ProfileError> {
        self.profile.get(hour)
    }

    /// Write one field, clamping the value into range
    pub fn set(&mut self, hour: usize, value: i64) -> Result<SetOutcome, ProfileError> {
        if hour >= HOURS_PER_DAY {
            return Err(ProfileError::HourOutOfRange(hour));
        }

        let stored = clamp_count(value);
        let mut values = *self.profile.as_array();
        values[hour] = stored;
        self.profile = HourlyProfile::clamped(values);

        if stored as i64 != value {
            log::debug!("Input {:02}:00 clamped {} -> {}", hour, value, stored);
        }

        Ok(SetOutcome {
            hour,
            requested: value,
            stored,
            clamped: stored as i64 != value,
        })
    }

    /// Overwrite all 24 fields in one assignment
    pub fn apply_preset(&mut self, profile: &HourlyProfile) {
        self.profile = *profile;
    }

    /// All fields back to zero
    pub fn reset(&mut self) {
        self.profile = HourlyProfile::zeroed();
    }

    pub fn values(&self) -> Vec<u32> {
        self.profile.as_slice().to_vec()
    }

    pub fn snapshot(&self) -> HourlyProfile {
        self.profile
    }
}
