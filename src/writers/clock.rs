//! Calendar-day sources for partitioning

use chrono::{Local, NaiveDate, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub trait Clock: Send + Sync {
    /// The calendar day new writes belong to
    fn today(&self) -> NaiveDate;
}

/// Which zone decides where one day ends and the next begins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Host local time zone
    #[default]
    Local,
    Utc,
}

impl Clock for DayBoundary {
    fn today(&self) -> NaiveDate {
        match self {
            DayBoundary::Local => Local::now().date_naive(),
            DayBoundary::Utc => Utc::now().date_naive(),
        }
    }
}

/// A clock that only moves when told to
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_tee_logger::writers::{Clock, ManualClock};
///
/// let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// clock.advance_days(1);
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
/// ```
#[derive(Debug)]
pub struct ManualClock {
    day: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Mutex::new(day),
        }
    }

    pub fn set(&self, day: NaiveDate) {
        *self.day.lock() = day;
    }

    pub fn advance_days(&self, days: u64) {
        let mut day = self.day.lock();
        if let Some(next) = day.checked_add_days(chrono::Days::new(days)) {
            *day = next;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.day.lock()
    }
}
