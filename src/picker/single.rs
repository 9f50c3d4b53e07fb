use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use super::clock::{Clock, SystemClock};
use super::component::{CalendarView, Component, Effect};
use super::constraints::Constraints;
use super::grid::{build_months, weekday_headers, GridOptions};
use super::options::DatepickerConfig;
use super::state::PickerState;
use super::value::{local_midnight, start_of_day, SelectedValue};

/// Inputs owned by the caller for the single-date picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleProps {
    /// The authoritative selection
    pub date: Option<NaiveDateTime>,
    pub constraints: Constraints,
    pub config: DatepickerConfig,
    pub close_on_select: bool,
    pub default_open: bool,
    pub disabled: bool,
    pub show_outside_days: bool,
}

impl Default for SingleProps {
    fn default() -> Self {
        Self {
            date: None,
            constraints: Constraints::default(),
            config: DatepickerConfig::default(),
            close_on_select: true,
            default_open: false,
            disabled: false,
            show_outside_days: true,
        }
    }
}

impl SingleProps {
    fn value(&self) -> SelectedValue {
        SelectedValue::Single(self.date)
    }

    fn draft(&self) -> String {
        self.config.date_format.format(self.date.as_ref())
    }
}

/// Messages handled by the single-date picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleMsg {
    Open,
    /// Popover dismissed without a selection
    Close,
    DayClicked(NaiveDate),
    /// The full new contents of the text field
    TextEdited(String),
    Clear,
    /// Move the visible window by whole months
    Navigate(i32),
}

/// Single-date picker controller
pub struct SingleDatepicker {
    clock: Arc<dyn Clock>,
}

impl Default for SingleDatepicker {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleDatepicker {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn anchor(&self, props: &SingleProps) -> NaiveDate {
        props
            .date
            .as_ref()
            .map(local_midnight)
            .unwrap_or_else(|| self.clock.today())
    }

    fn select_day(&self, day: NaiveDate, props: &SingleProps, state: &mut PickerState) -> Effect {
        if let Err(violation) = props.constraints.check_day(day) {
            trace!("PICKER: ignoring click: {}", violation);
            return Effect::None;
        }

        let date = start_of_day(day);
        let effect = state
            .commit(SelectedValue::Single(Some(date)), &props.value())
            .and(state.set_draft(props.config.date_format.format(Some(&date))));

        if props.close_on_select {
            let draft = state.draft_text.clone();
            effect.and(state.close(draft, day))
        } else {
            effect
        }
    }

    fn edit_text(&self, text: String, props: &SingleProps, state: &mut PickerState) -> Effect {
        let effect = state.set_draft(text.clone());

        let date = match props.config.date_format.parse(&text) {
            Ok(date) => date,
            Err(failure) => {
                trace!("PICKER: draft not a date yet: {}", failure);
                return effect;
            }
        };
        if let Err(violation) = props.constraints.check(&date) {
            trace!("PICKER: typed date not selectable: {}", violation);
            return effect;
        }

        let reanchored = state.view.reanchor(local_midnight(&date));
        effect
            .and(state.commit(SelectedValue::Single(Some(date)), &props.value()))
            .and(state.set_view(reanchored))
    }
}

impl Component for SingleDatepicker {
    type Props = SingleProps;
    type State = PickerState;
    type Message = SingleMsg;

    fn init(&self, props: &Self::Props) -> Self::State {
        PickerState::new(props.draft(), self.anchor(props), props.default_open)
    }

    fn update(&mut self, msg: Self::Message, props: &Self::Props, state: &mut Self::State) -> Effect {
        if props.disabled && msg != SingleMsg::Close {
            trace!("PICKER: disabled, dropping {:?}", msg);
            return Effect::None;
        }

        match msg {
            SingleMsg::Open => state.open(props.draft(), self.anchor(props)),
            SingleMsg::Close => {
                if state.is_open() {
                    state.close(props.draft(), self.anchor(props))
                } else {
                    Effect::None
                }
            }
            SingleMsg::DayClicked(day) => self.select_day(day, props, state),
            SingleMsg::TextEdited(text) => self.edit_text(text, props, state),
            SingleMsg::Clear => state.set_draft(String::new()),
            SingleMsg::Navigate(delta) => {
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
        if old_props.date != new_props.date {
            state.reconcile(&new_props.value(), new_props.draft(), self.anchor(new_props))
        } else if old_props.config.date_format != new_props.config.date_format {
            state.set_draft(new_props.draft())
        } else {
            Effect::None
        }
    }
}

/// Shared rendering for both picker variants
pub(crate) fn calendar_view(
    config: &DatepickerConfig,
    constraints: &Constraints,
    selection: &SelectedValue,
    show_outside_days: bool,
    state: &PickerState,
    today: NaiveDate,
) -> CalendarView {
    let options = GridOptions {
        months_to_display: config.months_to_display,
        first_day_of_week: config.first_day_of_week,
        show_outside_days,
        today: Some(today),
    };
    let months = build_months(&state.view, &options, constraints, selection);
    let month_titles = months
        .iter()
        .map(|month| config.month_title(month.month0(), month.year))
        .collect();

    CalendarView {
        months,
        weekday_headers: weekday_headers(&config.weekday_names, config.first_day_of_week),
        month_titles,
        draft_text: state.draft_text.clone(),
        is_open: state.is_open(),
        offset: state.view.offset,
        can_go_back: state.view.can_navigate(-1, config.months_to_display, constraints),
        can_go_forward: state.view.can_navigate(1, config.months_to_display, constraints),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::clock::FixedClock;
    use crate::picker::state::Phase;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker() -> SingleDatepicker {
        SingleDatepicker::with_clock(Arc::new(FixedClock(day(2024, 6, 15))))
    }

    fn props_with(date: Option<NaiveDate>) -> SingleProps {
        SingleProps {
            date: date.map(start_of_day),
            ..SingleProps::default()
        }
    }

    #[test]
    fn test_init_mirrors_value() {
        let props = props_with(Some(day(2024, 1, 10)));
        let state = picker().init(&props);
        assert_eq!(state.draft_text, "2024-01-10");
        assert_eq!(state.view.anchor, day(2024, 1, 10));
        assert_eq!(state.phase, Phase::Closed);
    }

    #[test]
    fn test_init_without_value_anchors_today() {
        let props = SingleProps { default_open: true, ..props_with(None) };
        let state = picker().init(&props);
        assert_eq!(state.draft_text, "");
        assert_eq!(state.view.anchor, day(2024, 6, 15));
        assert!(state.is_open());
    }

    #[test]
    fn test_click_commits_and_closes() {
        let mut p = picker();
        let props = props_with(None);
        let mut state = p.init(&props);
        let _ = p.update(SingleMsg::Open, &props, &mut state);

        let effect = p.update(SingleMsg::DayClicked(day(2024, 6, 20)), &props, &mut state);
        assert_eq!(
            effect.committed(),
            Some(&SelectedValue::Single(Some(start_of_day(day(2024, 6, 20)))))
        );
        assert!(effect.into_vec().contains(&Effect::CloseRequest));
        assert_eq!(state.draft_text, "2024-06-20");
        assert!(!state.is_open());
    }

    #[test]
    fn test_click_without_close_on_select_stays_open() {
        let mut p = picker();
        let props = SingleProps { close_on_select: false, ..props_with(None) };
        let mut state = p.init(&props);
        let _ = p.update(SingleMsg::Open, &props, &mut state);
        let effect = p.update(SingleMsg::DayClicked(day(2024, 6, 20)), &props, &mut state);
        assert!(effect.committed().is_some());
        assert!(!effect.into_vec().contains(&Effect::CloseRequest));
        assert!(state.is_open());
    }

    #[test]
    fn test_click_outside_bounds_is_ignored() {
        let mut p = picker();
        let props = SingleProps {
            constraints: Constraints::new().with_max(day(2024, 6, 30)),
            ..props_with(None)
        };
        let mut state = p.init(&props);
        let _ = p.update(SingleMsg::Open, &props, &mut state);
        let effect = p.update(SingleMsg::DayClicked(day(2024, 7, 1)), &props, &mut state);
        assert_eq!(effect, Effect::None);
        assert!(state.is_open());
    }

    #[test]
    fn test_typing_partial_text_only_updates_draft() {
        let mut p = picker();
        let props = props_with(Some(day(2024, 1, 10)));
        let mut state = p.init(&props);
        let effect = p.update(SingleMsg::TextEdited("2024-0".to_string()), &props, &mut state);
        assert_eq!(effect, Effect::DraftTextChange("2024-0".to_string()));
        assert_eq!(state.draft_text, "2024-0");
    }

    #[test]
    fn test_typing_valid_date_commits_and_moves_anchor() {
        let mut p = picker();
        let props = props_with(Some(day(2024, 1, 10)));
        let mut state = p.init(&props);
        state.view = state.view.navigate(2);

        let effect = p.update(SingleMsg::TextEdited("2024-03-05".to_string()), &props, &mut state);
        assert_eq!(
            effect.committed(),
            Some(&SelectedValue::Single(Some(start_of_day(day(2024, 3, 5)))))
        );
        assert_eq!(state.view.anchor, day(2024, 3, 5));
        assert_eq!(state.view.offset, 0);
    }

    #[test]
    fn test_typing_disabled_date_does_not_commit() {
        let mut p = picker();
        let props = SingleProps {
            constraints: Constraints::new().disable(day(2024, 5, 1)),
            ..props_with(None)
        };
        let mut state = p.init(&props);
        let effect = p.update(SingleMsg::TextEdited("2024-05-01".to_string()), &props, &mut state);
        assert!(effect.committed().is_none());
        assert_eq!(state.draft_text, "2024-05-01");
    }

    #[test]
    fn test_clear_empties_draft_without_commit() {
        let mut p = picker();
        let props = props_with(Some(day(2024, 1, 10)));
        let mut state = p.init(&props);
        let effect = p.update(SingleMsg::Clear, &props, &mut state);
        assert_eq!(effect, Effect::DraftTextChange(String::new()));
        assert!(effect.committed().is_none());
    }

    #[test]
    fn test_close_discards_edits() {
        let mut p = picker();
        let props = props_with(Some(day(2024, 1, 10)));
        let mut state = p.init(&props);
        let _ = p.update(SingleMsg::Open, &props, &mut state);
        let _ = p.update(SingleMsg::TextEdited("20".to_string()), &props, &mut state);
        let _ = p.update(SingleMsg::Navigate(3), &props, &mut state);

        let _ = p.update(SingleMsg::Close, &props, &mut state);
        assert_eq!(state.draft_text, "2024-01-10");
        assert_eq!(state.view.offset, 0);
        assert!(!state.is_open());
    }

    #[test]
    fn test_disabled_picker_ignores_input() {
        let mut p = picker();
        let props = SingleProps { disabled: true, ..props_with(None) };
        let mut state = p.init(&props);
        assert_eq!(p.update(SingleMsg::Open, &props, &mut state), Effect::None);
        assert_eq!(
            p.update(SingleMsg::TextEdited("2024-06-01".to_string()), &props, &mut state),
            Effect::None
        );
        assert!(!state.is_open());
    }

    #[test]
    fn test_navigate_stops_at_min_month() {
        let mut p = picker();
        let props = SingleProps {
            constraints: Constraints::new().with_min(day(2024, 5, 10)),
            ..props_with(Some(day(2024, 6, 1)))
        };
        let mut state = p.init(&props);
        assert_eq!(
            p.update(SingleMsg::Navigate(-1), &props, &mut state),
            Effect::ViewOffsetChange(-1)
        );
        assert_eq!(p.update(SingleMsg::Navigate(-1), &props, &mut state), Effect::None);
        assert_eq!(state.view.offset, -1);
    }

    #[test]
    fn test_format_change_rederives_draft() {
        let mut p = picker();
        let old = props_with(Some(day(2024, 1, 10)));
        let mut state = p.init(&old);
        let mut new = old.clone();
        new.config.date_format = crate::picker::codec::DatePattern::new("dd/MM/yyyy").unwrap();
        let effect = p.did_update(&old, &new, &mut state);
        assert_eq!(effect, Effect::DraftTextChange("10/01/2024".to_string()));
    }

    #[test]
    fn test_view_exposes_grid_and_labels() {
        let p = picker();
        let props = props_with(Some(day(2024, 3, 5)));
        let state = p.init(&props);
        let view = p.view(&props, &state);
        assert_eq!(view.months.len(), 1);
        assert_eq!(view.month_titles, vec!["March 2024".to_string()]);
        assert_eq!(view.weekday_headers[0], "Sun");
        assert!(view.months[0].find(day(2024, 3, 5)).unwrap().selected);
        assert!(view.can_go_back && view.can_go_forward);
    }

    #[test]
    fn test_custom_month_names_title_the_panel() {
        let overrides = crate::picker::options::ConfigOverrides {
            month_names: Some((1..=12).map(|m| format!("M{}", m)).collect()),
            ..Default::default()
        };
        let mut p = picker();
        let props = SingleProps {
            config: DatepickerConfig::resolve(&overrides, None).unwrap(),
            ..props_with(Some(day(2024, 3, 5)))
        };
        let mut state = p.init(&props);
        p.update(SingleMsg::Open, &props, &mut state);
        assert_eq!(p.view(&props, &state).month_titles, vec!["M3 2024".to_string()]);
    }
}
