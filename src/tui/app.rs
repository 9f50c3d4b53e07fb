use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, trace, warn};

use crate::config::TriggerStyle;
use crate::picker::range::format_range;
use crate::picker::value::hover_range;
use crate::picker::view_state::{last_of_month, shift_months};
use crate::picker::{
    CalendarView, Clock, Effect, Picker, PickerCallbacks, PickerState, RangeDatepicker, RangeMsg,
    RangePicker, RangeProps, SelectedValue, SingleDatepicker, SingleMsg, SingleProps, SinglePicker,
    RANGE_SEPARATOR,
};

use super::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Calendar,
}

/// Gestures both controllers understand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCommand {
    Open,
    Close,
    DayClicked(NaiveDate),
    TextEdited(String),
    Clear,
    Navigate(i32),
}

impl From<PickerCommand> for SingleMsg {
    fn from(command: PickerCommand) -> Self {
        match command {
            PickerCommand::Open => SingleMsg::Open,
            PickerCommand::Close => SingleMsg::Close,
            PickerCommand::DayClicked(day) => SingleMsg::DayClicked(day),
            PickerCommand::TextEdited(text) => SingleMsg::TextEdited(text),
            PickerCommand::Clear => SingleMsg::Clear,
            PickerCommand::Navigate(delta) => SingleMsg::Navigate(delta),
        }
    }
}

impl From<PickerCommand> for RangeMsg {
    fn from(command: PickerCommand) -> Self {
        match command {
            PickerCommand::Open => RangeMsg::Open,
            PickerCommand::Close => RangeMsg::Close,
            PickerCommand::DayClicked(day) => RangeMsg::DayClicked(day),
            PickerCommand::TextEdited(text) => RangeMsg::TextEdited(text),
            PickerCommand::Clear => RangeMsg::Clear,
            PickerCommand::Navigate(delta) => RangeMsg::Navigate(delta),
        }
    }
}

/// Whichever controller the screen is driving
pub enum Mounted {
    Single(SinglePicker),
    Range(RangePicker),
}

impl Mounted {
    fn send(&mut self, command: PickerCommand) -> Effect {
        match self {
            Mounted::Single(picker) => picker.dispatch(command.into()),
            Mounted::Range(picker) => picker.dispatch(command.into()),
        }
    }

    /// Hand the owner's value back to the controller
    fn write(&mut self, value: SelectedValue) -> Effect {
        match (self, value) {
            (Mounted::Single(picker), SelectedValue::Single(date)) => {
                picker.update_props(|props| props.date = date)
            }
            (Mounted::Range(picker), SelectedValue::Range(range)) => {
                picker.update_props(|props| props.selected = range)
            }
            (_, value) => {
                warn!("APP: {:?} does not fit the mounted picker", value);
                Effect::None
            }
        }
    }

    fn value(&self) -> SelectedValue {
        match self {
            Mounted::Single(picker) => SelectedValue::Single(picker.props().date),
            Mounted::Range(picker) => SelectedValue::Range(picker.props().selected),
        }
    }

    fn state(&self) -> &PickerState {
        match self {
            Mounted::Single(picker) => picker.state(),
            Mounted::Range(picker) => picker.state(),
        }
    }

    fn view(&self) -> CalendarView {
        match self {
            Mounted::Single(picker) => picker.view(),
            Mounted::Range(picker) => picker.view(),
        }
    }

    fn months_to_display(&self) -> usize {
        match self {
            Mounted::Single(picker) => picker.props().config.months_to_display,
            Mounted::Range(picker) => picker.props().config.months_to_display,
        }
    }

    fn pattern(&self) -> &str {
        match self {
            Mounted::Single(picker) => picker.props().config.date_format.as_str(),
            Mounted::Range(picker) => picker.props().config.date_format.as_str(),
        }
    }

    /// The committed value as the trigger button shows it
    fn formatted_value(&self) -> String {
        match self {
            Mounted::Single(picker) => {
                let props = picker.props();
                props.config.date_format.format(props.date.as_ref())
            }
            Mounted::Range(picker) => {
                let props = picker.props();
                format_range(&props.selected, &props.config.date_format)
            }
        }
    }
}

/// The owner of the selected value
///
/// Holds the authoritative [`SelectedValue`] and writes every commit back
/// into the mounted controller, exactly like a controlled input.
pub struct App {
    picker: Mounted,
    value: SelectedValue,
    trigger: TriggerStyle,
    focus: Focus,
    cursor: NaiveDate,
    open: bool,
    should_quit: bool,
}

impl App {
    pub fn new(picker: Mounted, trigger: TriggerStyle) -> Self {
        let value = picker.value();
        let state = picker.state();
        let open = state.is_open();
        let cursor = state.view.anchor;
        Self {
            picker,
            value,
            trigger,
            focus: if open { Focus::Calendar } else { Focus::Input },
            cursor,
            open,
            should_quit: false,
        }
    }

    pub fn single(props: SingleProps, trigger: TriggerStyle, clock: Arc<dyn Clock>) -> Self {
        let picker = Picker::mount(SingleDatepicker::with_clock(clock), props);
        Self::new(Mounted::Single(picker), trigger)
    }

    pub fn range(props: RangeProps, trigger: TriggerStyle, clock: Arc<dyn Clock>) -> Self {
        let picker = Picker::mount(RangeDatepicker::with_clock(clock), props);
        Self::new(Mounted::Range(picker), trigger)
    }

    pub fn value(&self) -> SelectedValue {
        self.value
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn trigger(&self) -> TriggerStyle {
        self.trigger
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view(&self) -> CalendarView {
        self.picker.view()
    }

    pub fn draft_text(&self) -> &str {
        &self.picker.state().draft_text
    }

    pub fn trigger_text(&self) -> String {
        match self.trigger {
            TriggerStyle::Button => self.picker.formatted_value(),
            TriggerStyle::Input => self.draft_text().to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.picker {
            Mounted::Single(_) => "Date",
            Mounted::Range(_) => "Range",
        }
    }

    /// Hint shown in an empty trigger, e.g. "YYYY-MM-DD - YYYY-MM-DD"
    pub fn placeholder(&self) -> String {
        let pattern = self.picker.pattern();
        match self.picker {
            Mounted::Single(_) => pattern.to_string(),
            Mounted::Range(_) => format!("{pattern}{RANGE_SEPARATOR}{pattern}"),
        }
    }

    /// Days that would be in the range if the cursor day were picked next
    pub fn preview(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.value {
            SelectedValue::Range(range) if self.open && self.focus == Focus::Calendar => {
                hover_range(&range, self.cursor)
            }
            _ => None,
        }
    }

    pub fn handle(&mut self, action: Action) {
        debug!("ACTION: {:?}", action);
        match action {
            Action::Quit => self.should_quit = true,
            Action::Open => {
                self.send(PickerCommand::Open);
                self.cursor = self.picker.state().view.anchor;
                self.focus = Focus::Calendar;
            }
            Action::Close => self.send(PickerCommand::Close),
            Action::ToggleFocus => {
                if self.open {
                    self.focus = match self.focus {
                        Focus::Input => Focus::Calendar,
                        Focus::Calendar => Focus::Input,
                    };
                }
            }
            Action::TypeChar(c) => {
                let mut text = self.draft_text().to_string();
                text.push(c);
                self.send(PickerCommand::TextEdited(text));
            }
            Action::Backspace => {
                let mut text = self.draft_text().to_string();
                if text.pop().is_some() {
                    self.send(PickerCommand::TextEdited(text));
                }
            }
            Action::ClearText => self.send(PickerCommand::Clear),
            Action::MoveCursor(days) => self.move_cursor(days),
            Action::NavigateMonths(months) => self.navigate_months(months),
            Action::SelectCursor => self.send(PickerCommand::DayClicked(self.cursor)),
        }
        self.keep_cursor_visible();
    }

    fn send(&mut self, command: PickerCommand) {
        let effect = self.picker.send(command);
        effect.dispatch(self);
    }

    fn move_cursor(&mut self, days: i64) {
        let target = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        let Some(target) = target else {
            return;
        };

        let delta = self.months_outside_view(target);
        if delta != 0 {
            let before = self.picker.state().view;
            self.send(PickerCommand::Navigate(delta));
            if self.picker.state().view == before {
                trace!("KEY: cursor blocked at {}", self.cursor);
                return;
            }
        }
        self.cursor = target;
    }

    fn navigate_months(&mut self, months: i32) {
        let before = self.picker.state().view;
        self.send(PickerCommand::Navigate(months));
        if self.picker.state().view != before {
            self.cursor = shift_months(self.cursor, months).unwrap_or(self.cursor);
        }
    }

    /// Signed months from the visible window to `day`; 0 when visible
    fn months_outside_view(&self, day: NaiveDate) -> i32 {
        let view = self.picker.state().view;
        let last_index = self.picker.months_to_display().saturating_sub(1);
        let (Some(first), Some(last)) = (view.first_visible_month(), view.visible_month(last_index)) else {
            return 0;
        };
        let month_index = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
        if day < first {
            month_index(day) - month_index(first)
        } else if last_of_month(last).is_some_and(|end| day > end) {
            month_index(day) - month_index(last)
        } else {
            0
        }
    }

    fn keep_cursor_visible(&mut self) {
        if self.open && self.months_outside_view(self.cursor) != 0 {
            let view = self.picker.state().view;
            self.cursor = view.first_visible_month().unwrap_or(view.anchor);
        }
    }
}

impl PickerCallbacks for App {
    fn on_commit(&mut self, value: SelectedValue) {
        debug!("APP: committed {:?}", value);
        self.value = value;
        let echo = self.picker.write(value);
        echo.dispatch(self);
    }

    fn on_open_request(&mut self) {
        self.open = true;
    }

    fn on_close_request(&mut self) {
        self.open = false;
        self.focus = Focus::Input;
    }

    fn on_view_offset_change(&mut self, offset: i32) {
        trace!("APP: view offset now {}", offset);
    }

    fn on_draft_text_change(&mut self, text: &str) {
        trace!("APP: draft now {:?}", text);
    }
}
