//! Local wall-clock access

use chrono::{Local, NaiveDateTime, NaiveTime};

/// Source of the current local time of day.
///
/// No timezone handling happens past this point; the schedule window only ever
/// sees local wall-clock time.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;

    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Clock backed by the operating system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::{Arc, Mutex};

    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::Clock;

    /// Settable clock, shared between a test and the code under test
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<NaiveDateTime>>,
    }

    impl ManualClock {
        /// Clock fixed at `hour:minute` on an arbitrary date
        pub fn at(hour: u32, minute: u32) -> Self {
            let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
            Self {
                now: Arc::new(Mutex::new(date.and_time(time))),
            }
        }

        pub fn set_time(&self, hour: u32, minute: u32) {
            let mut now = self.now.lock().unwrap();
            *now = now.date().and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap()
        }
    }
}
