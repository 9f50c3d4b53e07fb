//! Month -> Week -> DayCell grid generation.
//!
//! The grid is the only thing a renderer needs: selectability, outside-month
//! status and selection highlighting are all decided here.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::constraints::Constraints;
use super::value::SelectedValue;
use super::view_state::{last_of_month, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub months_to_display: usize,
    pub first_day_of_week: Weekday,
    pub show_outside_days: bool,
    pub today: Option<NaiveDate>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            months_to_display: 1,
            first_day_of_week: Weekday::Sun,
            show_outside_days: true,
            today: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Leading/trailing day from a neighbouring month
    pub outside_month: bool,
    pub selectable: bool,
    /// The single value or one of the range bounds
    pub selected: bool,
    /// Inside a complete range, bounds included
    pub in_range: bool,
    pub today: bool,
}

/// Seven columns; `None` is a blank placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    pub cells: [Option<DayCell>; 7],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    /// 1-based
    pub month: u32,
    pub first_day: NaiveDate,
    pub weeks: Vec<Week>,
}

impl Month {
    /// Cells that belong to this month, in order
    pub fn days(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.weeks
            .iter()
            .flat_map(|week| week.cells.iter().flatten())
            .filter(|cell| !cell.outside_month)
    }

    pub fn find(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }

    /// Zero-based month index, for looking up names
    pub fn month0(&self) -> usize {
        self.month as usize - 1
    }
}

/// Build the visible months for `view`
pub fn build_months(
    view: &ViewState,
    options: &GridOptions,
    constraints: &Constraints,
    selection: &SelectedValue,
) -> Vec<Month> {
    (0..options.months_to_display.max(1))
        .filter_map(|index| view.visible_month(index))
        .filter_map(|first| build_month(first, options, constraints, selection))
        .collect()
}

/// Build one month starting at `first` (any day of the month works)
pub fn build_month(
    first: NaiveDate,
    options: &GridOptions,
    constraints: &Constraints,
    selection: &SelectedValue,
) -> Option<Month> {
    let first = first.with_day(1)?;
    let last = last_of_month(first)?;
    let lead = leading_days(first.weekday(), options.first_day_of_week);
    let mut week_start = first.checked_sub_days(Days::new(u64::from(lead)))?;

    let mut weeks = Vec::with_capacity(6);
    while week_start <= last {
        let mut cells = [None; 7];
        for (slot, date) in cells.iter_mut().zip(week_start.iter_days()) {
            let outside_month = date < first || date > last;
            if outside_month && !options.show_outside_days {
                continue;
            }
            *slot = Some(DayCell {
                date,
                outside_month,
                selectable: constraints.is_day_selectable(date),
                selected: selection.is_selected(date),
                in_range: selection.in_range(date),
                today: options.today == Some(date),
            });
        }
        weeks.push(Week { cells });
        week_start = match week_start.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }

    Some(Month {
        year: first.year(),
        month: first.month(),
        first_day: first,
        weeks,
    })
}

/// Locate a cell across all visible months, ignoring outside-month copies
pub fn find_cell(months: &[Month], date: NaiveDate) -> Option<&DayCell> {
    months.iter().find_map(|month| month.find(date))
}

/// Weekday names (Sunday first) rotated so column 0 is `first_day_of_week`
pub fn weekday_headers(names: &[String; 7], first_day_of_week: Weekday) -> [String; 7] {
    let mut rotated = names.clone();
    rotated.rotate_left(first_day_of_week.num_days_from_sunday() as usize);
    rotated
}

/// Number of outside-month days before the 1st
fn leading_days(first_weekday: Weekday, first_day_of_week: Weekday) -> u32 {
    (first_weekday.num_days_from_sunday() + 7 - first_day_of_week.num_days_from_sunday()) % 7
}
