use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use super::clock::{Clock, SystemClock};
use super::codec::DatePattern;
use super::component::{CalendarView, Component, Effect};
use super::constraints::Constraints;
use super::error::ParseFailure;
use super::options::DatepickerConfig;
use super::single::calendar_view;
use super::state::PickerState;
use super::value::{local_midnight, start_of_day, DateRange, SelectedValue};

/// Between the two ends in the text field
pub const RANGE_SEPARATOR: &str = " - ";

/// When a range click should dismiss the popover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeClosePolicy {
    /// Close after the first click of a range
    pub on_start: bool,
    /// Close once the range is complete
    pub on_complete: bool,
}

impl Default for RangeClosePolicy {
    fn default() -> Self {
        Self {
            on_start: false,
            on_complete: true,
        }
    }
}

impl RangeClosePolicy {
    /// Keep the popover open whatever is clicked
    pub fn never() -> Self {
        Self {
            on_start: false,
            on_complete: false,
        }
    }

    fn should_close(&self, range: &DateRange) -> bool {
        if range.is_complete() {
            self.on_complete
        } else {
            self.on_start
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeProps {
    pub selected: DateRange,
    pub constraints: Constraints,
    pub config: DatepickerConfig,
    pub close_policy: RangeClosePolicy,
    pub default_open: bool,
    pub disabled: bool,
    pub show_outside_days: bool,
}

impl Default for RangeProps {
    fn default() -> Self {
        Self {
            selected: DateRange::empty(),
            constraints: Constraints::default(),
            config: DatepickerConfig::default(),
            close_policy: RangeClosePolicy::default(),
            default_open: false,
            disabled: false,
            show_outside_days: true,
        }
    }
}

impl RangeProps {
    fn value(&self) -> SelectedValue {
        SelectedValue::Range(self.selected)
    }

    fn draft(&self) -> String {
        format_range(&self.selected, &self.config.date_format)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeMsg {
    Open,
    Close,
    DayClicked(NaiveDate),
    TextEdited(String),
    Clear,
    Navigate(i32),
}

/// Render a range for the text field: "", "start" or "start - end"
pub fn format_range(range: &DateRange, pattern: &DatePattern) -> String {
    match (range.start.as_ref(), range.end.as_ref()) {
        (None, None) => String::new(),
        (Some(start), None) => pattern.format(Some(start)),
        (Some(start), Some(end)) => {
            format!("{}{}{}", pattern.format(Some(start)), RANGE_SEPARATOR, pattern.format(Some(end)))
        }
        // a lone end reads back as a start
        (None, Some(end)) => pattern.format(Some(end)),
    }
}

/// Parse "start" or "start - end"; the ends are put in order
pub fn parse_range(text: &str, pattern: &DatePattern) -> Result<DateRange, ParseFailure> {
    match text.split_once(RANGE_SEPARATOR) {
        None => pattern.parse(text).map(DateRange::starting_at),
        Some((start, "")) => pattern.parse(start).map(DateRange::starting_at),
        Some((start, end)) => {
            let start = pattern.parse(start)?;
            let end = pattern.parse(end)?;
            Ok(DateRange::ordered(start, end))
        }
    }
}

/// Date-range picker controller
pub struct RangeDatepicker {
    clock: Arc<dyn Clock>,
}

impl Default for RangeDatepicker {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeDatepicker {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn anchor(&self, props: &RangeProps) -> NaiveDate {
        props
            .selected
            .start
            .as_ref()
            .map(local_midnight)
            .unwrap_or_else(|| self.clock.today())
    }

    fn select_day(&self, day: NaiveDate, props: &RangeProps, state: &mut PickerState) -> Effect {
        if let Err(violation) = props.constraints.check_day(day) {
            trace!("PICKER: ignoring click: {}", violation);
            return Effect::None;
        }

        let next = next_range(&props.selected, start_of_day(day));
        let effect = state
            .commit(SelectedValue::Range(next), &props.value())
            .and(state.set_draft(format_range(&next, &props.config.date_format)));

        if props.close_policy.should_close(&next) {
            let draft = state.draft_text.clone();
            effect.and(state.close(draft, day))
        } else {
            effect
        }
    }

    fn edit_text(&self, text: String, props: &RangeProps, state: &mut PickerState) -> Effect {
        let effect = state.set_draft(text.clone());

        let range = match parse_range(&text, &props.config.date_format) {
            Ok(range) => range,
            Err(failure) => {
                trace!("PICKER: draft not a range yet: {}", failure);
                return effect;
            }
        };
        for end in [range.start, range.end].iter().flatten() {
            if let Err(violation) = props.constraints.check(end) {
                trace!("PICKER: typed range not selectable: {}", violation);
                return effect;
            }
        }

        let Some(start) = range.start else {
            return effect;
        };
        let reanchored = state.view.reanchor(local_midnight(&start));
        effect
            .and(state.commit(SelectedValue::Range(range), &props.value()))
            .and(state.set_view(reanchored))
    }
}

/// Apply one click to the current range
///
/// An empty or complete range restarts at the clicked day; a range with only
/// one end is completed, swapping the ends if needed.
fn next_range(current: &DateRange, clicked: NaiveDateTime) -> DateRange {
    match (current.start, current.end) {
        (Some(start), None) | (None, Some(start)) => DateRange::ordered(start, clicked),
        _ => DateRange::starting_at(clicked),
    }
}

impl Component for RangeDatepicker {
    type Props = RangeProps;
    type State = PickerState;
    type Message = RangeMsg;

    fn init(&self, props: &Self::Props) -> Self::State {
        PickerState::new(props.draft(), self.anchor(props), props.default_open)
    }

    fn update(&mut self, msg: Self::Message, props: &Self::Props, state: &mut Self::State) -> Effect {
        if props.disabled && msg != RangeMsg::Close {
            trace!("PICKER: disabled, dropping {:?}", msg);
            return Effect::None;
        }

        match msg {
            RangeMsg::Open => state.open(props.draft(), self.anchor(props)),
            RangeMsg::Close => {
                if state.is_open() {
                    state.close(props.draft(), self.anchor(props))
                } else {
                    Effect::None
                }
            }
            RangeMsg::DayClicked(day) => self.select_day(day, props, state),
            RangeMsg::TextEdited(text) => self.edit_text(text, props, state),
            RangeMsg::Clear => state.set_draft(String::new()),
            RangeMsg::Navigate(delta) => {
                if state
                    .view
                    .can_navigate(delta, props.config.months_to_display, &props.constraints)
                {
                    state.set_view(state.view.navigate(delta))
                } else {
                    trace!("PICKER: navigation by {} is out of bounds", delta);
                    Effect::None
                }
            }
        }
    }

    fn view(&self, props: &Self::Props, state: &Self::State) -> CalendarView {
        calendar_view(
            &props.config,
            &props.constraints,
            &props.value(),
            props.show_outside_days,
            state,
            self.clock.today(),
        )
    }

    fn did_update(
        &mut self,
        old_props: &Self::Props,
        new_props: &Self::Props,
        state: &mut Self::State,
    ) -> Effect {
        if old_props.selected != new_props.selected {
            state.reconcile(&new_props.value(), new_props.draft(), self.anchor(new_props))
        } else if old_props.config.date_format != new_props.config.date_format {
            state.set_draft(new_props.draft())
        } else {
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::clock::FixedClock;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        start_of_day(day(y, m, d))
    }

    fn picker() -> RangeDatepicker {
        RangeDatepicker::with_clock(Arc::new(FixedClock(day(2024, 6, 1))))
    }

    fn committed_range(effect: &Effect) -> Option<DateRange> {
        match effect.committed() {
            Some(SelectedValue::Range(range)) => Some(*range),
            _ => None,
        }
    }

    #[test]
    fn test_format_range() {
        let pattern = DatePattern::default();
        assert_eq!(format_range(&DateRange::empty(), &pattern), "");
        assert_eq!(format_range(&DateRange::starting_at(at(2024, 6, 10)), &pattern), "2024-06-10");
        assert_eq!(
            format_range(&DateRange::ordered(at(2024, 6, 10), at(2024, 6, 14)), &pattern),
            "2024-06-10 - 2024-06-14"
        );
    }

    #[test]
    fn test_parse_range() {
        let pattern = DatePattern::default();
        assert_eq!(
            parse_range("2024-06-10", &pattern).unwrap(),
            DateRange::starting_at(at(2024, 6, 10))
        );
        assert_eq!(
            parse_range("2024-06-10 - ", &pattern).unwrap(),
            DateRange::starting_at(at(2024, 6, 10))
        );
        assert_eq!(
            parse_range("2024-06-14 - 2024-06-10", &pattern).unwrap(),
            DateRange::new(Some(at(2024, 6, 10)), Some(at(2024, 6, 14)))
        );
        assert!(parse_range("2024-06-10 - 2024-06", &pattern).is_err());
        assert!(parse_range("2024-06-10 -", &pattern).is_err());
    }

    #[test]
    fn test_first_click_starts_range_and_stays_open() {
        let mut p = picker();
        let props = RangeProps::default();
        let mut state = p.init(&props);
        let _ = p.update(RangeMsg::Open, &props, &mut state);

        let effect = p.update(RangeMsg::DayClicked(day(2024, 6, 10)), &props, &mut state);
        assert_eq!(committed_range(&effect), Some(DateRange::starting_at(at(2024, 6, 10))));
        assert!(state.is_open());
        assert_eq!(state.draft_text, "2024-06-10");
    }

    #[test]
    fn test_second_click_completes_and_closes() {
        let mut p = picker();
        let props = RangeProps {
            selected: DateRange::starting_at(at(2024, 6, 10)),
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        let _ = p.update(RangeMsg::Open, &props, &mut state);

        let effect = p.update(RangeMsg::DayClicked(day(2024, 6, 14)), &props, &mut state);
        assert_eq!(
            committed_range(&effect),
            Some(DateRange::ordered(at(2024, 6, 10), at(2024, 6, 14)))
        );
        assert!(effect.into_vec().contains(&Effect::CloseRequest));
        assert_eq!(state.draft_text, "2024-06-10 - 2024-06-14");
    }

    #[test]
    fn test_second_click_before_start_swaps() {
        let mut p = picker();
        let props = RangeProps {
            selected: DateRange::starting_at(at(2024, 6, 10)),
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        let effect = p.update(RangeMsg::DayClicked(day(2024, 6, 3)), &props, &mut state);
        assert_eq!(
            committed_range(&effect),
            Some(DateRange::new(Some(at(2024, 6, 3)), Some(at(2024, 6, 10))))
        );
    }

    #[test]
    fn test_end_only_range_reads_as_start() {
        let pattern = DatePattern::default();
        let end_only = DateRange::new(None, Some(at(2024, 6, 10)));
        let text = format_range(&end_only, &pattern);
        assert_eq!(text, "2024-06-10");
        assert_eq!(parse_range(&text, &pattern).unwrap(), DateRange::starting_at(at(2024, 6, 10)));

        let mut p = picker();
        let props = RangeProps {
            selected: end_only,
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        assert_eq!(state.draft_text, "2024-06-10");
        let effect = p.update(RangeMsg::DayClicked(day(2024, 6, 4)), &props, &mut state);
        assert_eq!(
            committed_range(&effect),
            Some(DateRange::ordered(at(2024, 6, 4), at(2024, 6, 10)))
        );
    }

    #[test]
    fn test_click_on_complete_range_restarts() {
        let mut p = picker();
        let props = RangeProps {
            selected: DateRange::ordered(at(2024, 6, 10), at(2024, 6, 14)),
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        let effect = p.update(RangeMsg::DayClicked(day(2024, 6, 20)), &props, &mut state);
        assert_eq!(committed_range(&effect), Some(DateRange::starting_at(at(2024, 6, 20))));
    }

    #[test]
    fn test_close_policy_on_start() {
        let mut p = picker();
        let props = RangeProps {
            close_policy: RangeClosePolicy { on_start: true, on_complete: true },
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        let _ = p.update(RangeMsg::Open, &props, &mut state);
        let _ = p.update(RangeMsg::DayClicked(day(2024, 6, 10)), &props, &mut state);
        assert!(!state.is_open());
    }

    #[test]
    fn test_close_policy_never() {
        let mut p = picker();
        let props = RangeProps {
            selected: DateRange::starting_at(at(2024, 6, 10)),
            close_policy: RangeClosePolicy::never(),
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        let _ = p.update(RangeMsg::Open, &props, &mut state);
        let _ = p.update(RangeMsg::DayClicked(day(2024, 6, 12)), &props, &mut state);
        assert!(state.is_open());
    }

    #[test]
    fn test_disabled_end_is_rejected() {
        let mut p = picker();
        let props = RangeProps {
            selected: DateRange::starting_at(at(2024, 6, 10)),
            constraints: Constraints::new().disable(day(2024, 6, 12)),
            ..RangeProps::default()
        };
        let mut state = p.init(&props);
        assert_eq!(p.update(RangeMsg::DayClicked(day(2024, 6, 12)), &props, &mut state), Effect::None);

        let effect = p.update(
            RangeMsg::TextEdited("2024-06-10 - 2024-06-12".to_string()),
            &props,
            &mut state,
        );
        assert!(effect.committed().is_none());
        assert_eq!(state.draft_text, "2024-06-10 - 2024-06-12");
    }

    #[test]
    fn test_typing_full_range_commits() {
        let mut p = picker();
        let props = RangeProps::default();
        let mut state = p.init(&props);
        let effect = p.update(
            RangeMsg::TextEdited("2024-07-04 - 2024-07-01".to_string()),
            &props,
            &mut state,
        );
        assert_eq!(
            committed_range(&effect),
            Some(DateRange::new(Some(at(2024, 7, 1)), Some(at(2024, 7, 4))))
        );
        assert_eq!(state.view.anchor, day(2024, 7, 1));
        // the draft keeps what was typed
        assert_eq!(state.draft_text, "2024-07-04 - 2024-07-01");
    }

    #[test]
    fn test_external_change_rederives_draft() {
        let mut p = picker();
        let old = RangeProps::default();
        let mut state = p.init(&old);
        let new = RangeProps {
            selected: DateRange::ordered(at(2024, 8, 1), at(2024, 8, 3)),
            ..RangeProps::default()
        };
        let _ = p.did_update(&old, &new, &mut state);
        assert_eq!(state.draft_text, "2024-08-01 - 2024-08-03");
        assert_eq!(state.view.anchor, day(2024, 8, 1));
    }

    #[test]
    fn test_view_marks_range() {
        let p = picker();
        let props = RangeProps {
            selected: DateRange::ordered(at(2024, 6, 10), at(2024, 6, 12)),
            ..RangeProps::default()
        };
        let state = p.init(&props);
        let view = p.view(&props, &state);
        let month = &view.months[0];
        assert!(month.find(day(2024, 6, 11)).unwrap().in_range);
        assert!(!month.find(day(2024, 6, 11)).unwrap().selected);
        assert!(month.find(day(2024, 6, 12)).unwrap().selected);
        assert!(month.find(day(2024, 6, 1)).unwrap().today);
    }
}
