//! Login auto-start registration

use std::{fs, path::PathBuf};

use tracing::{info, warn};

use crate::error::PlatformError;

/// Fixed identifier the auto-start entry is keyed by
pub const APP_ID: &str = "water-reminder";

/// OS-level startup registration.
///
/// Failures are reported once and never retried.
pub trait AutoStart: Send {
    fn enable(&self) -> Result<(), PlatformError>;

    fn disable(&self) -> Result<(), PlatformError>;

    fn query(&self) -> Result<bool, PlatformError>;

    /// Best-effort check; a failed query counts as disabled
    fn is_enabled(&self) -> bool {
        match self.query() {
            Ok(enabled) => enabled,
            Err(e) => {
                warn!("Failed to query auto-start state: {}", e);
                false
            }
        }
    }
}

/// Auto-start through an XDG `autostart/<id>.desktop` entry
#[derive(Debug, Clone)]
pub struct XdgAutoStart {
    autostart_dir: Option<PathBuf>,
    exec: PathBuf,
}

impl XdgAutoStart {
    /// Entry in the user's config dir, launching the running executable
    pub fn for_current_user() -> Self {
        let exec = std::env::current_exe().unwrap_or_else(|_| PathBuf::from(APP_ID));
        Self {
            autostart_dir: dirs::config_dir().map(|dir| dir.join("autostart")),
            exec,
        }
    }

    pub fn with_dir(autostart_dir: impl Into<PathBuf>, exec: impl Into<PathBuf>) -> Self {
        Self {
            autostart_dir: Some(autostart_dir.into()),
            exec: exec.into(),
        }
    }

    fn entry_path(&self) -> Result<PathBuf, PlatformError> {
        self.autostart_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.desktop", APP_ID)))
            .ok_or_else(|| {
                PlatformError::RegistryMissing("no user config directory".to_string())
            })
    }

    fn desktop_entry(&self) -> String {
        format!(
            "[Desktop Entry]\nType=Application\nName=Drink Water Reminder\nExec={}\nX-GNOME-Autostart-enabled=true\n",
            self.exec.display()
        )
    }
}

impl AutoStart for XdgAutoStart {
    fn enable(&self) -> Result<(), PlatformError> {
        let path = self.entry_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PlatformError::from_io(&e))?;
        }
        fs::write(&path, self.desktop_entry()).map_err(|e| PlatformError::from_io(&e))?;
        info!("Auto-start enabled at {}", path.display());
        Ok(())
    }

    fn disable(&self) -> Result<(), PlatformError> {
        let path = self.entry_path()?;
        fs::remove_file(&path).map_err(|e| PlatformError::from_io(&e))?;
        info!("Auto-start disabled, removed {}", path.display());
        Ok(())
    }

    fn query(&self) -> Result<bool, PlatformError> {
        let path = self.entry_path()?;
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PlatformError::from_io(&e)),
        }
    }
}
