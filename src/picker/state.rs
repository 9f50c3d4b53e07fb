//! Transient state shared by the single and range controllers.
//!
//! Nothing here is authoritative. The owner holds the selected value; this
//! is a cache of what is shown plus the guard that tells our own writes
//! apart from genuine external changes.

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::component::Effect;
use super::view_state::ViewState;
use super::value::SelectedValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

/// Outcome of seeing a new external value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// The owner reflected our own proposal back
    Echo,
    /// Someone else changed the value
    External,
}

/// One-shot "ignore the next echo" guard
///
/// Remembers the last value this controller proposed. The first external
/// value observed afterwards either matches it (an echo, suppressed) or
/// does not (a real change); either way the guard disarms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoGuard {
    pending: Option<SelectedValue>,
}

impl EchoGuard {
    /// Record a proposal; a proposal equal to `current` produces no echo
    pub fn arm(&mut self, proposed: SelectedValue, current: &SelectedValue) {
        if proposed != *current {
            self.pending = Some(proposed);
        }
    }

    pub fn observe(&mut self, incoming: &SelectedValue) -> Reconcile {
        match self.pending.take() {
            Some(proposed) if proposed == *incoming => Reconcile::Echo,
            _ => Reconcile::External,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub phase: Phase,
    pub draft_text: String,
    pub view: ViewState,
    pub echo: EchoGuard,
}

impl PickerState {
    pub fn new(draft_text: String, anchor: NaiveDate, open: bool) -> Self {
        Self {
            phase: if open { Phase::Open } else { Phase::Closed },
            draft_text,
            view: ViewState::new(anchor),
            echo: EchoGuard::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn set_draft(&mut self, text: String) -> Effect {
        if self.draft_text == text {
            return Effect::None;
        }
        self.draft_text = text.clone();
        Effect::DraftTextChange(text)
    }

    pub fn set_view(&mut self, view: ViewState) -> Effect {
        let previous = self.view.offset;
        self.view = view;
        if previous == view.offset {
            Effect::None
        } else {
            Effect::ViewOffsetChange(view.offset)
        }
    }

    /// Enter Open, re-deriving draft and view from the external value
    pub fn open(&mut self, draft_text: String, anchor: NaiveDate) -> Effect {
        debug!("PICKER: open (anchor {})", anchor);
        self.phase = Phase::Open;
        Effect::OpenRequest
            .and(self.set_view(ViewState::new(anchor)))
            .and(self.set_draft(draft_text))
    }

    /// Enter Closed, discarding edits in favour of the external value
    pub fn close(&mut self, draft_text: String, anchor: NaiveDate) -> Effect {
        debug!("PICKER: close");
        self.phase = Phase::Closed;
        Effect::CloseRequest
            .and(self.set_view(ViewState::new(anchor)))
            .and(self.set_draft(draft_text))
    }

    /// Propose `proposed` to the owner and expect it back
    pub fn commit(&mut self, proposed: SelectedValue, current: &SelectedValue) -> Effect {
        debug!("PICKER: commit {:?}", proposed);
        self.echo.arm(proposed, current);
        Effect::Commit(proposed)
    }

    /// React to the owner's value changing from under us
    pub fn reconcile(&mut self, incoming: &SelectedValue, draft_text: String, anchor: NaiveDate) -> Effect {
        match self.echo.observe(incoming) {
            Reconcile::Echo => {
                trace!("PICKER: suppressed echo of own commit");
                Effect::None
            }
            Reconcile::External => {
                debug!("PICKER: external value change, re-deriving draft and view");
                self.set_view(ViewState::new(anchor)).and(self.set_draft(draft_text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::value::start_of_day;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn single(y: i32, m: u32, d: u32) -> SelectedValue {
        SelectedValue::Single(Some(start_of_day(day(y, m, d))))
    }

    #[test]
    fn test_guard_suppresses_exactly_one_echo() {
        let mut guard = EchoGuard::default();
        guard.arm(single(2024, 3, 5), &single(2024, 1, 10));
        assert!(guard.is_armed());
        assert_eq!(guard.observe(&single(2024, 3, 5)), Reconcile::Echo);
        assert!(!guard.is_armed());
        assert_eq!(guard.observe(&single(2024, 3, 5)), Reconcile::External);
    }

    #[test]
    fn test_guard_treats_different_value_as_external() {
        let mut guard = EchoGuard::default();
        guard.arm(single(2024, 3, 5), &SelectedValue::default());
        assert_eq!(guard.observe(&single(2024, 3, 6)), Reconcile::External);
        assert!(!guard.is_armed());
    }

    #[test]
    fn test_guard_ignores_proposal_equal_to_current() {
        let mut guard = EchoGuard::default();
        guard.arm(single(2024, 3, 5), &single(2024, 3, 5));
        assert!(!guard.is_armed());
    }

    #[test]
    fn test_set_draft_only_reports_changes() {
        let mut state = PickerState::new("a".to_string(), day(2024, 1, 1), false);
        assert_eq!(state.set_draft("a".to_string()), Effect::None);
        assert_eq!(state.set_draft("ab".to_string()), Effect::DraftTextChange("ab".to_string()));
        assert_eq!(state.draft_text, "ab");
    }

    #[test]
    fn test_open_resets_view_and_draft() {
        let mut state = PickerState::new("junk".to_string(), day(2024, 1, 1), false);
        state.view = state.view.navigate(4);
        let effect = state.open("2024-03-05".to_string(), day(2024, 3, 5));
        assert!(state.is_open());
        assert_eq!(state.view, ViewState::new(day(2024, 3, 5)));
        assert_eq!(
            effect.into_vec(),
            vec![
                Effect::OpenRequest,
                Effect::ViewOffsetChange(0),
                Effect::DraftTextChange("2024-03-05".to_string()),
            ]
        );
    }

    #[test]
    fn test_reconcile_external_rederives() {
        let mut state = PickerState::new("2024-01-10".to_string(), day(2024, 1, 10), false);
        state.view = state.view.navigate(-2);
        let effect = state.reconcile(&single(2024, 3, 5), "2024-03-05".to_string(), day(2024, 3, 5));
        assert_eq!(state.draft_text, "2024-03-05");
        assert_eq!(state.view.offset, 0);
        assert_eq!(state.view.anchor, day(2024, 3, 5));
        assert!(!effect.is_none());
    }

    #[test]
    fn test_reconcile_echo_keeps_draft() {
        let mut state = PickerState::new("2024-3-5".to_string(), day(2024, 3, 5), true);
        let _ = state.commit(single(2024, 3, 5), &single(2024, 1, 10));
        let effect = state.reconcile(&single(2024, 3, 5), "2024-03-05".to_string(), day(2024, 3, 5));
        assert_eq!(effect, Effect::None);
        assert_eq!(state.draft_text, "2024-3-5");
    }
}
