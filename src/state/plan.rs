//! Validation of the user-entered reminder inputs

use chrono::NaiveTime;

use super::ScheduleWindow;
use crate::error::ValidationError;

/// Interval and window that a reminder cycle is armed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPlan {
    pub interval_minutes: u64,
    pub window: ScheduleWindow,
}

impl ReminderPlan {
    /// Validate the three text fields, without looking at the current time.
    ///
    /// Used when saving settings. Checks run in field order, so an empty
    /// interval is reported before a malformed time.
    pub fn validate(
        interval_text: &str,
        start_text: &str,
        end_text: &str,
    ) -> Result<Self, ValidationError> {
        let interval_minutes = parse_interval(interval_text)?;
        let window = ScheduleWindow::validate(start_text, end_text)?;
        Ok(Self {
            interval_minutes,
            window,
        })
    }

    /// Validate the inputs and additionally require `now` to be inside the window
    pub fn validate_at(
        interval_text: &str,
        start_text: &str,
        end_text: &str,
        now: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let plan = Self::validate(interval_text, start_text, end_text)?;
        if !plan.window.contains(now) {
            return Err(ValidationError::OutsideRange);
        }
        Ok(plan)
    }

    pub fn interval_seconds(&self) -> u64 {
        self.interval_minutes * 60
    }
}

/// Parse the interval in whole minutes
pub fn parse_interval(text: &str) -> Result<u64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    let minutes: i64 = text.parse().map_err(|_| ValidationError::NotANumber)?;
    if minutes <= 0 {
        return Err(ValidationError::NotPositive);
    }
    let minutes = minutes as u64;
    // Keep minutes * 60 representable.
    minutes
        .checked_mul(60)
        .map(|_| minutes)
        .ok_or(ValidationError::NotANumber)
}
