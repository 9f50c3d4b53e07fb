use chrono::{Local, NaiveDate};

/// Source of "today" for anchoring an empty calendar
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one day, for tests and reproducible output
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
