//! Commands - API for the frontend
//!
//! Plain functions over `AppState`. The Tauri bindings in `desktop.rs` wrap
//! these one-to-one; errors are turned into strings for the webview.

use serde::{Deserialize, Serialize};

use crate::constants::{APP_NAME, APP_VERSION, HOURS_PER_DAY, MAX_HOURLY_COUNT};
use crate::logic::chart::ChartData;
use crate::logic::input_state::SetOutcome;
use crate::logic::model::{ClassificationResult, EngineStatus, ModelMetadata};
use crate::logic::presets::{self, PresetInfo};
use crate::logic::profile::{self, BlockSpec, HourlyProfile};
use crate::state::AppState;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Current form values plus what the plot needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub values: Vec<u32>,
    pub chart: ChartData,
}

/// Form description for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormLayout {
    pub app_name: String,
    pub version: String,
    pub hours: usize,
    pub max_value: u32,
    pub blocks: Vec<BlockSpec>,
    pub presets: Vec<PresetInfo>,
}

// ============================================================================
// INPUT COMMANDS
// ============================================================================

pub fn get_inputs(state: &AppState) -> InputSnapshot {
    let inputs = state.inputs().read();
    snapshot_of(&inputs.snapshot())
}

/// Write one field (value is clamped into range)
pub fn set_input(state: &AppState, hour: usize, value: i64) -> Result<SetOutcome, String> {
    state.inputs().write()
        .set(hour, value)
        .map_err(|e| e.to_string())
}

/// Overwrite all fields from a named preset
pub fn apply_preset(state: &AppState, name: &str) -> Result<InputSnapshot, String> {
    let preset = presets::get_preset(name).map_err(|e| e.to_string())?;

    let mut inputs = state.inputs().write();
    inputs.apply_preset(&preset);
    log::info!("Applied preset '{}'", name);

    Ok(snapshot_of(&inputs.snapshot()))
}

pub fn reset_inputs(state: &AppState) -> InputSnapshot {
    let mut inputs = state.inputs().write();
    inputs.reset();
    log::info!("Inputs reset");
    snapshot_of(&inputs.snapshot())
}

pub fn get_chart(state: &AppState) -> ChartData {
    ChartData::from_profile(&state.inputs().read().snapshot())
}

fn snapshot_of(profile: &HourlyProfile) -> InputSnapshot {
    InputSnapshot {
        values: profile.as_slice().to_vec(),
        chart: ChartData::from_profile(profile),
    }
}

// ============================================================================
// LAYOUT COMMANDS
// ============================================================================

pub fn get_form_layout() -> FormLayout {
    FormLayout {
        app_name: APP_NAME.to_string(),
        version: APP_VERSION.to_string(),
        hours: HOURS_PER_DAY,
        max_value: MAX_HOURLY_COUNT,
        blocks: profile::form_layout(),
        presets: presets::list_presets(),
    }
}

pub fn list_presets() -> Vec<PresetInfo> {
    presets::list_presets()
}

// ============================================================================
// MODEL COMMANDS
// ============================================================================

/// Classify the current form values
pub fn classify_inputs(state: &AppState) -> Result<ClassificationResult, String> {
    // copy out so the lock is not held during inference
    let profile = state.inputs().read().snapshot();
    state.engine()
        .classify(&profile)
        .map_err(|e| e.to_string())
}

pub fn get_model_info(state: &AppState) -> ModelMetadata {
    state.engine().metadata().clone()
}

pub fn get_engine_status(state: &AppState) -> EngineStatus {
    state.engine().status()
}
