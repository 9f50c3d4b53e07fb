use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

use super::error::ConstraintViolation;
use super::value::local_midnight;

/// Which days may be selected
///
/// Bounds and disabled days are stored as `NaiveDate`, so every key is
/// already truncated to local midnight and every probe goes through
/// [`local_midnight`] before it is compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: BTreeSet<NaiveDate>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: NaiveDate) -> Self {
        self.min_date = Some(min);
        self
    }

    pub fn with_max(mut self, max: NaiveDate) -> Self {
        self.max_date = Some(max);
        self
    }

    pub fn disable(mut self, day: NaiveDate) -> Self {
        self.disabled_dates.insert(day);
        self
    }

    pub fn disable_all(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.disabled_dates.extend(days);
        self
    }

    /// Disable the local day containing an epoch-millisecond timestamp
    ///
    /// Timestamps that do not exist in the local zone are ignored.
    pub fn disable_timestamp_millis(mut self, millis: i64) -> Self {
        if let Some(instant) = Local.timestamp_millis_opt(millis).single() {
            self.disabled_dates.insert(instant.date_naive());
        }
        self
    }

    /// Why `date` cannot be selected, if it cannot
    pub fn check(&self, date: &NaiveDateTime) -> Result<(), ConstraintViolation> {
        self.check_day(local_midnight(date))
    }

    pub fn check_day(&self, day: NaiveDate) -> Result<(), ConstraintViolation> {
        if let Some(min) = self.min_date {
            if day < min {
                return Err(ConstraintViolation::BeforeMin { day, min });
            }
        }
        if let Some(max) = self.max_date {
            if day > max {
                return Err(ConstraintViolation::AfterMax { day, max });
            }
        }
        if self.disabled_dates.contains(&day) {
            return Err(ConstraintViolation::Disabled(day));
        }
        Ok(())
    }

    pub fn is_selectable(&self, date: &NaiveDateTime) -> bool {
        self.check(date).is_ok()
    }

    pub fn is_day_selectable(&self, day: NaiveDate) -> bool {
        self.check_day(day).is_ok()
    }
}

/// Free-function form of [`Constraints::is_selectable`]
pub fn is_selectable(date: &NaiveDateTime, constraints: &Constraints) -> bool {
    constraints.is_selectable(date)
}
