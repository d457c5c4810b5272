//! Chart data for the visualization panel
//!
//! The frontend draws; this module only decides what is drawn.

use serde::{Deserialize, Serialize};

use super::profile::HourlyProfile;

/// Y-axis ceiling is rounded up to a multiple of this
const Y_AXIS_STEP: u32 = 500;

/// Shaded hour range on the x-axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub start_hour: u32,
    pub end_hour: u32,
    pub label: String,
    pub color: String,
    pub opacity: f32,
}

/// Fixed rush-hour bands: 06-09 and 16-19
pub fn rush_hour_bands() -> Vec<Band> {
    vec![
        Band {
            start_hour: 6,
            end_hour: 9,
            label: "Morning rush".to_string(),
            color: "#facc15".to_string(),
            opacity: 0.1,
        },
        Band {
            start_hour: 16,
            end_hour: 19,
            label: "Evening rush".to_string(),
            color: "#f97316".to_string(),
            opacity: 0.1,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub hour: u32,
    pub value: u32,
}

/// Everything the plot needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
    pub series_color: String,
    pub points: Vec<Point>,
    pub x_ticks: Vec<String>,
    pub bands: Vec<Band>,
    pub y_max: u32,
}

impl ChartData {
    pub fn from_profile(profile: &HourlyProfile) -> Self {
        let points = profile.as_slice().iter()
            .enumerate()
            .map(|(hour, &value)| Point { hour: hour as u32, value })
            .collect();

        Self {
            title: "Input data".to_string(),
            x_label: "Hour".to_string(),
            y_label: "Volume".to_string(),
            series_label: "Data input".to_string(),
            series_color: "#4F8BF9".to_string(),
            points,
            x_ticks: (0..profile.as_slice().len()).map(|h| format!("{:02}", h)).collect(),
            bands: rush_hour_bands(),
            y_max: y_axis_ceiling(profile.max_value()),
        }
    }
}

/// Round a peak up to the next axis step (never below one step)
pub fn y_axis_ceiling(peak: u32) -> u32 {
    let steps = peak.div_ceil(Y_AXIS_STEP).max(1);
    steps * Y_AXIS_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::presets::PresetName;

    #[test]
    fn test_chart_follows_profile() {
        let profile = PresetName::Weekday.profile();
        let chart = ChartData::from_profile(&profile);

        assert_eq!(chart.points.len(), 24);
        assert_eq!(chart.points[12], Point { hour: 12, value: 1392 });
        assert_eq!(chart.x_ticks[0], "00");
        assert_eq!(chart.x_ticks[23], "23");
        assert_eq!(chart.y_max, 1500);
    }

    #[test]
    fn test_rush_hour_bands() {
        let bands = rush_hour_bands();
        assert_eq!(bands.len(), 2);
        assert_eq!((bands[0].start_hour, bands[0].end_hour), (6, 9));
        assert_eq!((bands[1].start_hour, bands[1].end_hour), (16, 19));
    }

    #[test]
    fn test_y_axis_ceiling() {
        assert_eq!(y_axis_ceiling(0), 500);
        assert_eq!(y_axis_ceiling(500), 500);
        assert_eq!(y_axis_ceiling(501), 1000);
        assert_eq!(y_axis_ceiling(5000), 5000);
    }
}
