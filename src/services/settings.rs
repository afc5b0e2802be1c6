//! Settings record persisted as JSON

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SettingsError;

/// The persisted user inputs, stored exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub language: String,
    pub interval: String,
    pub start_time: String,
    pub end_time: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            interval: "10".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:30".to_string(),
        }
    }
}

/// On-disk shape; any key may be missing
#[derive(Debug, Default, Deserialize)]
struct StoredSettings {
    language: Option<String>,
    interval: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
}

impl StoredSettings {
    fn is_complete(&self) -> bool {
        self.language.is_some()
            && self.interval.is_some()
            && self.start_time.is_some()
            && self.end_time.is_some()
    }

    fn fill(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            language: self.language.unwrap_or(defaults.language),
            interval: self.interval.unwrap_or(defaults.interval),
            start_time: self.start_time.unwrap_or(defaults.start_time),
            end_time: self.end_time.unwrap_or(defaults.end_time),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. A missing or corrupt file yields the defaults, and an
    /// incomplete one has its gaps filled; either way the file is rewritten.
    pub fn load(&self) -> Settings {
        let stored = match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<StoredSettings>(&content) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!("Settings file {} is corrupt: {}", self.path.display(), e);
                    None
                }
            },
            Err(e) => {
                info!("No settings at {} ({}), using defaults", self.path.display(), e);
                None
            }
        };

        let (settings, rewrite) = match stored {
            Some(stored) => {
                let complete = stored.is_complete();
                (stored.fill(), !complete)
            }
            None => (Settings::default(), true),
        };

        if rewrite {
            if let Err(e) = self.save(&settings) {
                warn!("Failed to rewrite settings: {}", e);
            }
        }
        debug!("Loaded settings: {:?}", settings);
        settings
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}
