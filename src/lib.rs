//! Day-Type Classifier - core library
//!
//! Collects 24 hourly pedestrian counts, feeds them to a pre-trained
//! classifier and reports whether the day looks like a weekday or a weekend.
//! The desktop shell (`src/main.rs`, feature `desktop`) only wires these
//! pieces to a webview.

pub mod api;
pub mod config;
pub mod constants;
pub mod logic;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
