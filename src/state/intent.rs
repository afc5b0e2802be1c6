//! Requests queued onto the event loop by the surface, the tray endpoint and signal handling

use serde::Deserialize;

/// Text fields of the settings view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettingsForm {
    pub language: String,
    pub interval: String,
    pub start_time: String,
    pub end_time: String,
}

/// A request to change application state. Producers on other tasks only
/// ever send these; the event loop applies them one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start when idle, stop otherwise (the main start/stop button)
    StartStop,
    Start,
    Stop,
    Acknowledge,
    SetInputs {
        interval: String,
        start_time: String,
        end_time: String,
    },
    SaveSettings(SettingsForm),
    OpenSettings,
    Backgroundize,
    Restore,
    ToggleVisibility,
    EnableAutoStart,
    DisableAutoStart,
    /// Re-publish the status without changing anything
    Refresh,
    Exit,
}
