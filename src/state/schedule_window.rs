//! Daily schedule window during which reminders are permitted

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A local wall-clock time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::TimeFormatError);
        }
        Ok(Self { hour, minute })
    }

    fn as_naive(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parse `HH:MM` (a single-digit hour or minute is accepted)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or(ValidationError::TimeFormatError)?;
        Self::new(parse_component(hour)?, parse_component(minute)?)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

fn parse_component(part: &str) -> Result<u32, ValidationError> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::TimeFormatError);
    }
    part.parse().map_err(|_| ValidationError::TimeFormatError)
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Validated `[start, end)` interval of the day. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct ScheduleWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct WindowBounds {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<WindowBounds> for ScheduleWindow {
    type Error = ValidationError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl ScheduleWindow {
    /// Parse and validate the two text fields as entered by the user
    pub fn validate(start_text: &str, end_text: &str) -> Result<Self, ValidationError> {
        let start: TimeOfDay = start_text.parse()?;
        let end: TimeOfDay = end_text.parse()?;
        Self::new(start, end)
    }

    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::TimeOrderError);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Half-open check: the start instant is inside, the end instant is not
    pub fn contains(&self, instant: NaiveTime) -> bool {
        let instant = instant.with_nanosecond(0).unwrap_or(instant);
        self.start.as_naive() <= instant && instant < self.end.as_naive()
    }
}

impl fmt::Display for ScheduleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn parses_valid_times() {
        assert_eq!("09:05".parse::<TimeOfDay>().unwrap(), TimeOfDay { hour: 9, minute: 5 });
        assert_eq!(" 9:00 ".parse::<TimeOfDay>().unwrap(), TimeOfDay { hour: 9, minute: 0 });
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().to_string(), "23:59");
    }

    #[test]
    fn rejects_malformed_and_out_of_range_times() {
        for bad in ["", "0900", "24:00", "12:60", "ab:cd", "12:", ":30", "-1:00", "123:00", "12:5x"] {
            assert_eq!(
                bad.parse::<TimeOfDay>(),
                Err(ValidationError::TimeFormatError),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn inverted_or_empty_window_is_rejected() {
        assert_eq!(
            ScheduleWindow::validate("18:00", "09:00"),
            Err(ValidationError::TimeOrderError)
        );
        assert_eq!(
            ScheduleWindow::validate("09:00", "09:00"),
            Err(ValidationError::TimeOrderError)
        );
    }

    #[test]
    fn format_error_wins_over_order_error() {
        assert_eq!(
            ScheduleWindow::validate("25:00", "09:00"),
            Err(ValidationError::TimeFormatError)
        );
    }

    #[test]
    fn contains_is_half_open() {
        let window = ScheduleWindow::validate("09:00", "17:30").unwrap();
        assert!(window.contains(at(9, 0, 0)));
        assert!(window.contains(at(17, 29, 59)));
        assert!(!window.contains(at(17, 30, 0)));
        assert!(!window.contains(at(8, 59, 59)));
        assert!(!window.contains(at(18, 0, 0)));
    }

    #[test]
    fn deserializing_a_window_goes_through_validation() {
        let window: ScheduleWindow =
            serde_json::from_str(r#"{"start":"09:00","end":"17:30"}"#).unwrap();
        assert_eq!(window, ScheduleWindow::validate("09:00", "17:30").unwrap());
        assert_eq!(
            serde_json::to_string(&window).unwrap(),
            r#"{"start":"09:00","end":"17:30"}"#
        );

        let reversed = serde_json::from_str::<ScheduleWindow>(r#"{"start":"18:00","end":"09:00"}"#);
        assert!(reversed.unwrap_err().to_string().contains("end time must be after start time"));
        assert!(serde_json::from_str::<ScheduleWindow>(r#"{"start":"25:00","end":"26:00"}"#).is_err());
        assert!(serde_json::from_str::<ScheduleWindow>(r#"{"start":"09:00","end":"09:00"}"#).is_err());
    }

    #[test]
    fn full_day_window_excludes_last_minute() {
        let window = ScheduleWindow::validate("00:00", "23:59").unwrap();
        assert!(window.contains(at(0, 0, 0)));
        assert!(window.contains(at(12, 0, 0)));
        assert!(!window.contains(at(23, 59, 30)));
    }
}
