//! API Module
//!
//! Structure:
//! - commands.rs: framework-agnostic command handlers over `AppState`
//! - desktop.rs: `#[tauri::command]` wrappers (feature `desktop`)

pub mod commands;
#[cfg(feature = "desktop")]
pub mod desktop;

// Re-export current version as default
pub use commands::*;
