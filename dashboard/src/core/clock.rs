//! # Clock
//!
//! Source of "today" for date validation. Validation always asks the clock at
//! the moment of dispatch, so a session left open across midnight sees the
//! new day.

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        lib_utils::now_local().date_naive()
    }
}

/// Clock pinned to a date, movable by hand. Used in tests.
#[derive(Debug)]
pub struct FixedClock {
    today: parking_lot::Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: parking_lot::Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock() = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock()
    }
}
