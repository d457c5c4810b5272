//! Tauri bindings for the commands in `commands.rs`
//!
//! `run` builds the window and registers every command with the state
//! prepared by the entry point.

use tauri::State;

use crate::logic::chart::ChartData;
use crate::logic::input_state::SetOutcome;
use crate::logic::model::{ClassificationResult, EngineStatus, ModelMetadata};
use crate::logic::presets::PresetInfo;
use crate::state::AppState;
use super::commands::{self, FormLayout, InputSnapshot};

// ============================================================================
// INPUT COMMANDS
// ============================================================================

#[tauri::command]
pub fn get_inputs(state: State<'_, AppState>) -> InputSnapshot {
    commands::get_inputs(&state)
}

#[tauri::command]
pub fn set_input(state: State<'_, AppState>, hour: usize, value: i64) -> Result<SetOutcome, String> {
    commands::set_input(&state, hour, value)
}

#[tauri::command]
pub fn apply_preset(state: State<'_, AppState>, name: String) -> Result<InputSnapshot, String> {
    commands::apply_preset(&state, &name)
}

#[tauri::command]
pub fn reset_inputs(state: State<'_, AppState>) -> InputSnapshot {
    commands::reset_inputs(&state)
}

#[tauri::command]
pub fn get_chart(state: State<'_, AppState>) -> ChartData {
    commands::get_chart(&state)
}

// ============================================================================
// LAYOUT COMMANDS
// ============================================================================

#[tauri::command]
pub fn get_form_layout() -> FormLayout {
    commands::get_form_layout()
}

#[tauri::command]
pub fn list_presets() -> Vec<PresetInfo> {
    commands::list_presets()
}

// ============================================================================
// MODEL COMMANDS
// ============================================================================

#[tauri::command]
pub fn classify_inputs(state: State<'_, AppState>) -> Result<ClassificationResult, String> {
    commands::classify_inputs(&state)
}

#[tauri::command]
pub fn get_model_info(state: State<'_, AppState>) -> ModelMetadata {
    commands::get_model_info(&state)
}

#[tauri::command]
pub fn get_engine_status(state: State<'_, AppState>) -> EngineStatus {
    commands::get_engine_status(&state)
}

// ============================================================================
// APPLICATION
// ============================================================================

/// Start the webview with an already-initialized state
pub fn run(state: AppState) -> tauri::Result<()> {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            // Input Commands
            get_inputs,
            set_input,
            apply_preset,
            reset_inputs,
            get_chart,

            // Layout Commands
            get_form_layout,
            list_presets,

            // Model Commands
            classify_inputs,
            get_model_info,
            get_engine_status,
        ])
        .run(tauri::generate_context!())
}
