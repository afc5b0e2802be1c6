//! Error taxonomy for input validation, platform collaborators and settings I/O

use thiserror::Error;

use crate::i18n::TextKey;

/// Errors raised while validating the interval and schedule window inputs.
///
/// These are always recovered locally: they block a state transition and are
/// shown to the user as a single message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("interval cannot be empty")]
    Empty,

    #[error("interval must be a number")]
    NotANumber,

    #[error("interval must be positive")]
    NotPositive,

    #[error("time must be in HH:MM format")]
    TimeFormatError,

    #[error("end time must be after start time")]
    TimeOrderError,

    #[error("current time is outside the reminder range")]
    OutsideRange,
}

impl ValidationError {
    /// Translation key of the message shown to the user
    pub fn text_key(&self) -> TextKey {
        match self {
            ValidationError::Empty => TextKey::IntervalEmpty,
            ValidationError::NotANumber => TextKey::IntervalInvalid,
            ValidationError::NotPositive => TextKey::IntervalError,
            ValidationError::TimeFormatError => TextKey::TimeInvalid,
            ValidationError::TimeOrderError => TextKey::TimeError,
            ValidationError::OutsideRange => TextKey::OutsideRange,
        }
    }
}

/// Failures reported by OS-level collaborators (auto-start entry, tray endpoint).
///
/// The core surfaces these but never interprets them beyond logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("access to the auto-start entry was denied: {0}")]
    RegistryAccessDenied(String),

    #[error("auto-start entry is missing: {0}")]
    RegistryMissing(String),

    #[error("tray affordance is unavailable: {0}")]
    TrayUnavailable(String),
}

impl PlatformError {
    /// Classify an I/O failure against the auto-start location
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => PlatformError::RegistryMissing(err.to_string()),
            _ => PlatformError::RegistryAccessDenied(err.to_string()),
        }
    }
}

/// Why a user command was refused by the reminder state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a reminder cycle is already {0}")]
    NotIdle(crate::state::ReminderState),

    #[error("inputs are locked while a reminder cycle runs")]
    InputsLocked,
}

/// Errors from reading or writing the settings record
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read/write settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}
