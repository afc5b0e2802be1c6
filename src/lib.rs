//! Water Reminder - periodic drink-water prompts within a daily time window
//!
//! This library provides the reminder scheduling state machine, the surface
//! visibility tracking, and the collaborators around them: settings
//! persistence, login auto-start and a tray control endpoint.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod i18n;
pub mod services;
pub mod state;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Intent, ReminderState};
pub use tasks::event_loop;
