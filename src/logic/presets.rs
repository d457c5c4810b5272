//! Preset Store
//!
//! Canonical weekday / weekend profiles used by the quick-fill buttons.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::HOURS_PER_DAY;
use super::error::ProfileError;
use super::profile::HourlyProfile;

const WEEKDAY_COUNTS: [u32; HOURS_PER_DAY] = [
    97, 45, 25, 22, 18, 21, 44, 98, 234, 194, 397, 642,
    1392, 1336, 1111, 949, 1012, 1275, 1261, 1282, 966, 792, 380, 251,
];

const WEEKEND_COUNTS: [u32; HOURS_PER_DAY] = [
    394, 264, 140, 144, 104, 28, 28, 25, 70, 153, 401, 649,
    1216, 1399, 1249, 1240, 1109, 1137, 1290, 1137, 791, 638, 597, 316,
];

/// Known preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Weekday,
    Weekend,
}

impl PresetName {
    pub const ALL: [PresetName; 2] = [PresetName::Weekday, PresetName::Weekend];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Weekday => "weekday",
            PresetName::Weekend => "weekend",
        }
    }

    /// Button caption
    pub fn button_label(&self) -> &'static str {
        match self {
            PresetName::Weekday => "Try weekday pattern",
            PresetName::Weekend => "Try weekend pattern",
        }
    }

    pub fn profile(&self) -> HourlyProfile {
        match self {
            PresetName::Weekday => HourlyProfile::clamped(WEEKDAY_COUNTS),
            PresetName::Weekend => HourlyProfile::clamped(WEEKEND_COUNTS),
        }
    }
}

impl std::fmt::Display for PresetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::ALL.iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| ProfileError::UnknownPreset(s.to_string()))
    }
}

/// Look up a preset by name
pub fn get_preset(name: &str) -> Result<HourlyProfile, ProfileError> {
    Ok(name.parse::<PresetName>()?.profile())
}

/// Preset summary for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetInfo {
    pub name: PresetName,
    pub label: String,
    pub values: Vec<u32>,
}

pub fn list_presets() -> Vec<PresetInfo> {
    PresetName::ALL.iter()
        .map(|p| PresetInfo {
            name: *p,
            label: p.button_label().to_string(),
            values: p.profile().as_slice().to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_verbatim() {
        assert_eq!(get_preset("weekday").unwrap().as_array(), &WEEKDAY_COUNTS);
        assert_eq!(get_preset("weekend").unwrap().as_array(), &WEEKEND_COUNTS);
    }

    #[test]
    fn test_presets_within_range() {
        // clamped() must be a no-op on the shipped presets
        for name in PresetName::ALL {
            let raw = match name {
                PresetName::Weekday => WEEKDAY_COUNTS,
                PresetName::Weekend => WEEKEND_COUNTS,
            };
            assert!(HourlyProfile::new(raw).is_ok(), "{} out of range", name);
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            get_preset("holiday"),
            Err(ProfileError::UnknownPreset("holiday".to_string()))
        );
        // names are case-sensitive
        assert!(get_preset("Weekday").is_err());
    }

    #[test]
    fn test_list_presets() {
        let presets = list_presets();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].name, PresetName::Weekday);
        assert_eq!(presets[1].values.len(), 24);
        assert_eq!(serde_json::to_string(&presets[1].name).unwrap(), "\"weekend\"");
    }
}
