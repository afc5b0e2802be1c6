//! Foreground/background tracking of the interactive surface

use serde::Serialize;
use tracing::{info, warn};

use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    Foreground,
    Backgrounded,
}

/// Tracks whether the surface is shown, independently of the reminder state.
///
/// Backgrounding needs a tray affordance to restore from; without one the
/// surface stays in the foreground so the application is never unreachable.
#[derive(Debug)]
pub struct VisibilityController {
    state: VisibilityState,
    affordance: Result<(), PlatformError>,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self {
            state: VisibilityState::Foreground,
            affordance: Err(PlatformError::TrayUnavailable(
                "tray endpoint not started".to_string(),
            )),
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_backgrounded(&self) -> bool {
        self.state == VisibilityState::Backgrounded
    }

    /// Record whether the background affordance could be created.
    ///
    /// Losing it while backgrounded forces the surface back to the foreground;
    /// returns `true` in that case.
    pub fn set_affordance(&mut self, affordance: Result<(), PlatformError>) -> bool {
        if let Err(e) = &affordance {
            warn!("Background affordance unavailable: {}", e);
        }
        self.affordance = affordance;
        if self.affordance.is_err() && self.is_backgrounded() {
            self.state = VisibilityState::Foreground;
            return true;
        }
        false
    }

    pub fn has_affordance(&self) -> bool {
        self.affordance.is_ok()
    }

    /// Foreground -> Backgrounded. Returns whether the state changed.
    pub fn backgroundize(&mut self) -> Result<bool, PlatformError> {
        self.affordance.clone()?;
        if self.is_backgrounded() {
            return Ok(false);
        }
        info!("Surface moved to background");
        self.state = VisibilityState::Backgrounded;
        Ok(true)
    }

    /// Backgrounded -> Foreground. Returns whether the state changed.
    pub fn restore(&mut self) -> bool {
        if !self.is_backgrounded() {
            return false;
        }
        info!("Surface restored");
        self.state = VisibilityState::Foreground;
        true
    }

    pub fn toggle(&mut self) -> Result<bool, PlatformError> {
        match self.state {
            VisibilityState::Foreground => self.backgroundize(),
            VisibilityState::Backgrounded => Ok(self.restore()),
        }
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_tray() -> VisibilityController {
        let mut visibility = VisibilityController::new();
        visibility.set_affordance(Ok(()));
        visibility
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let mut visibility = with_tray();
        assert_eq!(visibility.backgroundize(), Ok(true));
        assert_eq!(visibility.backgroundize(), Ok(false));
        assert_eq!(visibility.state(), VisibilityState::Backgrounded);

        assert!(visibility.restore());
        assert!(!visibility.restore());
        assert_eq!(visibility.state(), VisibilityState::Foreground);
    }

    #[test]
    fn toggle_dispatches_on_current_state() {
        let mut visibility = with_tray();
        visibility.toggle().unwrap();
        assert!(visibility.is_backgrounded());
        visibility.toggle().unwrap();
        assert!(!visibility.is_backgrounded());
    }

    #[test]
    fn no_affordance_keeps_surface_in_foreground() {
        let mut visibility = VisibilityController::new();
        assert!(matches!(
            visibility.backgroundize(),
            Err(PlatformError::TrayUnavailable(_))
        ));
        assert_eq!(visibility.state(), VisibilityState::Foreground);
    }

    #[test]
    fn losing_affordance_while_hidden_forces_foreground() {
        let mut visibility = with_tray();
        visibility.backgroundize().unwrap();
        let forced = visibility.set_affordance(Err(PlatformError::TrayUnavailable(
            "bind failed".to_string(),
        )));
        assert!(forced);
        assert_eq!(visibility.state(), VisibilityState::Foreground);
    }
}
