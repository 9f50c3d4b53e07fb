use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Truncate a date to its local-midnight day key
///
/// All selection and disabling comparisons happen at this granularity.
pub fn local_midnight(date: &NaiveDateTime) -> NaiveDate {
    date.date()
}

/// Midnight at the start of `day`
pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// A possibly incomplete date range
///
/// `start` without `end` means the user has picked the first bound and the
/// second click is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Range with only the first bound chosen
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self { start: Some(start), end: None }
    }

    /// Complete range, ordering the two bounds so that `start <= end`
    pub fn ordered(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        if local_midnight(&b) < local_midnight(&a) {
            Self { start: Some(b), end: Some(a) }
        } else {
            Self { start: Some(a), end: Some(b) }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// A start has been picked but no end yet
    pub fn is_in_progress(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    /// Inclusive day-granularity membership; false unless both bounds are set
    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                local_midnight(&start) <= day && day <= local_midnight(&end)
            }
            _ => false,
        }
    }
}

/// The externally owned selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectedValue {
    Single(Option<NaiveDateTime>),
    Range(DateRange),
}

impl Default for SelectedValue {
    fn default() -> Self {
        SelectedValue::Single(None)
    }
}

impl SelectedValue {
    pub fn is_empty(&self) -> bool {
        match self {
            SelectedValue::Single(date) => date.is_none(),
            SelectedValue::Range(range) => range.is_empty(),
        }
    }

    /// Day the calendar should open on when this value is shown
    pub fn anchor_day(&self) -> Option<NaiveDate> {
        match self {
            SelectedValue::Single(date) => date.as_ref().map(local_midnight),
            SelectedValue::Range(range) => range.start.as_ref().map(local_midnight),
        }
    }

    /// True when `day` is the single value or one of the range bounds
    pub fn is_selected(&self, day: NaiveDate) -> bool {
        let matches = |date: &Option<NaiveDateTime>| {
            date.as_ref().map(local_midnight) == Some(day)
        };
        match self {
            SelectedValue::Single(date) => matches(date),
            SelectedValue::Range(range) => matches(&range.start) || matches(&range.end),
        }
    }

    /// True when `day` lies within a complete range
    pub fn in_range(&self, day: NaiveDate) -> bool {
        match self {
            SelectedValue::Single(_) => false,
            SelectedValue::Range(range) => range.contains(day),
        }
    }
}

impl From<Option<NaiveDateTime>> for SelectedValue {
    fn from(date: Option<NaiveDateTime>) -> Self {
        SelectedValue::Single(date)
    }
}

impl From<DateRange> for SelectedValue {
    fn from(range: DateRange) -> Self {
        SelectedValue::Range(range)
    }
}

/// Preview of the range that would be committed if `hover` were clicked next
///
/// Only meaningful while a range is in progress. Pure derived data for the
/// presentation layer; nothing here is stored.
pub fn hover_range(range: &DateRange, hover: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if !range.is_in_progress() {
        return None;
    }
    let start = local_midnight(range.start.as_ref()?);
    Some((start.min(hover), start.max(hover)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(h, 30, 0).unwrap()
    }

    #[test]
    fn test_local_midnight_drops_time_of_day() {
        assert_eq!(local_midnight(&at(2024, 5, 1, 23)), day(2024, 5, 1));
        assert_eq!(start_of_day(day(2024, 5, 1)).time(), NaiveTime::MIN);
        assert_eq!(start_of_day(day(2024, 5, 1)).date(), day(2024, 5, 1));
    }

    #[test]
    fn test_ordered_swaps_reversed_bounds() {
        let range = DateRange::ordered(at(2024, 6, 10, 9), at(2024, 6, 5, 9));
        assert_eq!(range.start, Some(at(2024, 6, 5, 9)));
        assert_eq!(range.end, Some(at(2024, 6, 10, 9)));
    }

    #[test]
    fn test_ordered_same_day_keeps_click_order() {
        let range = DateRange::ordered(at(2024, 6, 5, 18), at(2024, 6, 5, 9));
        assert_eq!(range.start, Some(at(2024, 6, 5, 18)));
        assert!(range.is_complete());
    }

    #[test]
    fn test_contains_is_inclusive_and_day_granular() {
        let range = DateRange::ordered(at(2024, 6, 5, 22), at(2024, 6, 10, 1));
        assert!(range.contains(day(2024, 6, 5)));
        assert!(range.contains(day(2024, 6, 7)));
        assert!(range.contains(day(2024, 6, 10)));
        assert!(!range.contains(day(2024, 6, 11)));
        assert!(!DateRange::starting_at(at(2024, 6, 5, 0)).contains(day(2024, 6, 5)));
    }

    #[test]
    fn test_selected_value_flags() {
        let single = SelectedValue::Single(Some(at(2024, 1, 10, 12)));
        assert!(single.is_selected(day(2024, 1, 10)));
        assert!(!single.in_range(day(2024, 1, 10)));
        assert_eq!(single.anchor_day(), Some(day(2024, 1, 10)));

        let range = SelectedValue::Range(DateRange::ordered(at(2024, 1, 1, 0), at(2024, 1, 3, 0)));
        assert!(range.is_selected(day(2024, 1, 3)));
        assert!(!range.is_selected(day(2024, 1, 2)));
        assert!(range.in_range(day(2024, 1, 2)));
        assert!(SelectedValue::default().is_empty());
    }

    #[test]
    fn test_hover_range_only_while_in_progress() {
        let in_progress = DateRange::starting_at(at(2024, 6, 10, 0));
        assert_eq!(
            hover_range(&in_progress, day(2024, 6, 3)),
            Some((day(2024, 6, 3), day(2024, 6, 10)))
        );
        let complete = DateRange::ordered(at(2024, 6, 1, 0), at(2024, 6, 2, 0));
        assert_eq!(hover_range(&complete, day(2024, 6, 3)), None);
        assert_eq!(hover_range(&DateRange::empty(), day(2024, 6, 3)), None);
    }
}
