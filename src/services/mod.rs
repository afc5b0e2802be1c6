//! External collaborators
//!
//! Settings persistence and OS auto-start registration.

pub mod autostart;
pub mod settings;

// Re-export main types
pub use autostart::{AutoStart, XdgAutoStart, APP_ID};
pub use settings::{Settings, SettingsStore};
