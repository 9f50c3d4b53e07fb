use chrono::{Datelike, Months, NaiveDate};

use super::constraints::Constraints;

/// Which month(s) the calendar shows
///
/// The visible window starts at `anchor`'s month shifted by `offset` whole
/// months. Navigation only ever touches `offset`; `anchor` follows the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub anchor: NaiveDate,
    pub offset: i32,
}

impl ViewState {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor, offset: 0 }
    }

    /// Move the window by `delta` months without touching the anchor
    pub fn navigate(self, delta: i32) -> Self {
        Self {
            offset: self.offset.saturating_add(delta),
            ..self
        }
    }

    /// New anchor, window back on it
    pub fn reanchor(self, anchor: NaiveDate) -> Self {
        Self { anchor, offset: 0 }
    }

    /// First day of the `index`-th visible month (0 = leftmost)
    pub fn visible_month(&self, index: usize) -> Option<NaiveDate> {
        let index = i32::try_from(index).ok()?;
        shift_months(first_of_month(self.anchor), self.offset.checked_add(index)?)
    }

    pub fn first_visible_month(&self) -> Option<NaiveDate> {
        self.visible_month(0)
    }

    /// Whether moving by `delta` keeps the window reachable under the bounds
    ///
    /// Going back is allowed while the new first month still has a day on or
    /// after `min_date`; going forward while the new last month starts on or
    /// before `max_date`.
    pub fn can_navigate(&self, delta: i32, months_to_display: usize, constraints: &Constraints) -> bool {
        let next = self.navigate(delta);
        if delta < 0 {
            if let Some(min) = constraints.min_date {
                return next
                    .first_visible_month()
                    .and_then(last_of_month)
                    .is_some_and(|last| last >= min);
            }
        } else if delta > 0 {
            if let Some(max) = constraints.max_date {
                return next
                    .visible_month(months_to_display.saturating_sub(1))
                    .is_some_and(|first| first <= max);
            }
        }
        next.first_visible_month().is_some()
    }
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - chrono::Days::new(u64::from(day.day0()))
}

pub fn last_of_month(day: NaiveDate) -> Option<NaiveDate> {
    shift_months(first_of_month(day), 1)?.pred_opt()
}

/// Shift by whole months; `None` past the representable range
pub fn shift_months(day: NaiveDate, months: i32) -> Option<NaiveDate> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        day.checked_add_months(magnitude)
    } else {
        day.checked_sub_months(magnitude)
    }
}
