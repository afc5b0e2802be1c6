//! State management module
//!
//! This module contains the reminder state machine, its timer and schedule
//! window, visibility tracking and the application context tying them together.

pub mod app_state;
pub mod countdown;
pub mod intent;
pub mod notification;
pub mod plan;
pub mod reminder;
pub mod schedule_window;
pub mod visibility;

// Re-export main types
pub use app_state::{AppState, Flow, StatusSnapshot};
pub use countdown::{CountdownTimer, TickResult};
pub use intent::{Intent, SettingsForm};
pub use plan::ReminderPlan;
pub use reminder::{ReminderState, ReminderStateMachine};
pub use schedule_window::{ScheduleWindow, TimeOfDay};
pub use visibility::{VisibilityController, VisibilityState};
