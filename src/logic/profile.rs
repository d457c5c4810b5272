//! Hourly Profile - Core data structure for classifier input
//!
//! A day of pedestrian counts, one value per hour.
//! Index 0 = 00:00, index 23 = 23:00. Every value lies in [0, MAX_HOURLY_COUNT].

use serde::{Deserialize, Serialize};

use crate::constants::{HOURS_PER_BLOCK, HOURS_PER_DAY, INPUT_STEP, MAX_HOURLY_COUNT};
use super::error::ProfileError;

// ============================================================================
// HOURLY PROFILE
// ============================================================================

/// 24 hourly counts for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct HourlyProfile {
    values: [u32; HOURS_PER_DAY],
}

impl HourlyProfile {
    /// All-zero profile
    pub fn zeroed() -> Self {
        Self { values: [0; HOURS_PER_DAY] }
    }

    /// Build from values, clamping each into range
    pub fn clamped(values: [u32; HOURS_PER_DAY]) -> Self {
        Self { values: values.map(|v| v.min(MAX_HOURLY_COUNT)) }
    }

    /// Build from values, rejecting anything out of range
    pub fn new(values: [u32; HOURS_PER_DAY]) -> Result<Self, ProfileError> {
        if let Some((hour, &value)) = values.iter()
            .enumerate()
            .find(|(_, v)| **v > MAX_HOURLY_COUNT)
        {
            return Err(ProfileError::ValueOutOfRange { hour, value: value as i64 });
        }
        Ok(Self { values })
    }

    /// Build from a slice of arbitrary length (must be exactly 24)
    pub fn from_slice(values: &[u32]) -> Result<Self, ProfileError> {
        let array: [u32; HOURS_PER_DAY] = values.try_into()
            .map_err(|_| ProfileError::LengthMismatch {
                expected: HOURS_PER_DAY,
                actual: values.len(),
            })?;
        Self::new(array)
    }

    /// Value at an hour
    pub fn get(&self, hour: usize) -> Result<u32, ProfileError> {
        self.values.get(hour)
            .copied()
            .ok_or(ProfileError::HourOutOfRange(hour))
    }

    pub fn as_array(&self) -> &[u32; HOURS_PER_DAY] {
        &self.values
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Peak hourly count
    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Total count over the day
    pub fn total(&self) -> u64 {
        self.values.iter().map(|&v| v as u64).sum()
    }

    /// Classifier input vector (one f32 per hour, in order)
    pub fn to_features(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

impl Default for HourlyProfile {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl TryFrom<Vec<u32>> for HourlyProfile {
    type Error = ProfileError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<HourlyProfile> for Vec<u32> {
    fn from(profile: HourlyProfile) -> Self {
        profile.values.to_vec()
    }
}

/// Clamp a raw input into [0, MAX_HOURLY_COUNT]
pub fn clamp_count(value: i64) -> u32 {
    value.clamp(0, MAX_HOURLY_COUNT as i64) as u32
}

/// Field label for an hour ("07:00")
pub fn hour_label(hour: usize) -> String {
    format!("{:02}:00", hour)
}

// ============================================================================
// TIME BLOCKS (form tabs)
// ============================================================================

/// Time-of-day groups used to split the 24 fields into tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBlock {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
}

impl TimeBlock {
    pub const ALL: [TimeBlock; 4] = [
        TimeBlock::EarlyMorning,
        TimeBlock::Morning,
        TimeBlock::Afternoon,
        TimeBlock::Evening,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TimeBlock::EarlyMorning => "Early morning (00-05)",
            TimeBlock::Morning => "Morning (06-11)",
            TimeBlock::Afternoon => "Afternoon (12-17)",
            TimeBlock::Evening => "Evening (18-23)",
        }
    }

    /// Hours covered by this block
    pub fn hours(&self) -> std::ops::Range<usize> {
        let start = self.index() * HOURS_PER_BLOCK;
        start..start + HOURS_PER_BLOCK
    }

    pub fn index(&self) -> usize {
        match self {
            TimeBlock::EarlyMorning => 0,
            TimeBlock::Morning => 1,
            TimeBlock::Afternoon => 2,
            TimeBlock::Evening => 3,
        }
    }

    /// Block that contains an hour
    pub fn for_hour(hour: usize) -> Option<TimeBlock> {
        Self::ALL.get(hour / HOURS_PER_BLOCK).copied()
    }
}

/// One number input in the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub hour: usize,
    pub label: String,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

/// One tab of six fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpec {
    pub block: TimeBlock,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

/// Full form layout, tab by tab
pub fn form_layout() -> Vec<BlockSpec> {
    TimeBlock::ALL.iter()
        .map(|block| BlockSpec {
            block: *block,
            title: block.title().to_string(),
            fields: block.hours()
                .map(|hour| FieldSpec {
                    hour,
                    label: hour_label(hour),
                    min: 0,
                    max: MAX_HOURLY_COUNT,
                    step: INPUT_STEP,
                })
                .collect(),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_checks_length() {
        let err = HourlyProfile::from_slice(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, ProfileError::LengthMismatch { expected: 24, actual: 3 });

        let ok = HourlyProfile::from_slice(&[7; 24]).unwrap();
        assert_eq!(ok.get(23).unwrap(), 7);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let mut values = [0u32; 24];
        values[5] = 5001;
        let err = HourlyProfile::new(values).unwrap_err();
        assert_eq!(err, ProfileError::ValueOutOfRange { hour: 5, value: 5001 });
    }

    #[test]
    fn test_deserialize_enforces_range() {
        let mut values = vec![100u32; 24];
        values[3] = 5001;
        let json = serde_json::to_string(&values).unwrap();
        assert!(serde_json::from_str::<HourlyProfile>(&json).is_err());

        assert!(serde_json::from_str::<HourlyProfile>("[1, 2, 3]").is_err());

        let profile: HourlyProfile = serde_json::from_str(&serde_json::to_string(&[5000u32; 24]).unwrap()).unwrap();
        assert_eq!(profile.max_value(), MAX_HOURLY_COUNT);
        assert_eq!(serde_json::to_value(profile).unwrap(), serde_json::json!(vec![5000u32; 24]));
    }

    #[test]
    fn test_clamped_caps_values() {
        let mut values = [100u32; 24];
        values[0] = 9999;
        let profile = HourlyProfile::clamped(values);
        assert_eq!(profile.get(0).unwrap(), MAX_HOURLY_COUNT);
        assert_eq!(profile.get(1).unwrap(), 100);
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(-20), 0);
        assert_eq!(clamp_count(4999), 4999);
        assert_eq!(clamp_count(5000), 5000);
        assert_eq!(clamp_count(123_456), 5000);
    }

    #[test]
    fn test_features_follow_hour_order() {
        let mut values = [0u32; 24];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as u32 * 10;
        }
        let features = HourlyProfile::new(values).unwrap().to_features();
        assert_eq!(features.len(), 24);
        assert_eq!(features[0], 0.0);
        assert_eq!(features[23], 230.0);
    }

    #[test]
    fn test_get_out_of_range_hour() {
        let profile = HourlyProfile::zeroed();
        assert_eq!(profile.get(24), Err(ProfileError::HourOutOfRange(24)));
    }

    #[test]
    fn test_form_layout_four_tabs_of_six() {
        let layout = form_layout();
        assert_eq!(layout.len(), 4);
        assert!(layout.iter().all(|b| b.fields.len() == 6));

        let hours: Vec<usize> = layout.iter()
            .flat_map(|b| b.fields.iter().map(|f| f.hour))
            .collect();
        assert_eq!(hours, (0..24).collect::<Vec<_>>());

        assert_eq!(layout[1].fields[0].label, "06:00");
        assert_eq!(layout[3].title, "Evening (18-23)");
        assert_eq!(layout[0].fields[0].step, 10);
        assert_eq!(layout[0].fields[0].max, 5000);
    }

    #[test]
    fn test_block_for_hour() {
        assert_eq!(TimeBlock::for_hour(0), Some(TimeBlock::EarlyMorning));
        assert_eq!(TimeBlock::for_hour(11), Some(TimeBlock::Morning));
        assert_eq!(TimeBlock::for_hour(17), Some(TimeBlock::Afternoon));
        assert_eq!(TimeBlock::for_hour(23), Some(TimeBlock::Evening));
        assert_eq!(TimeBlock::for_hour(24), None);
    }
}
