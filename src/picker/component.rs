use super::grid::Month;
use super::value::SelectedValue;

/// Core component trait
///
/// Each picker variant:
/// - Receives Props (the external value, constraints, config) as a read-only snapshot
/// - Owns State (draft text, view offset, echo guard) that is purely derived
/// - Handles Messages (user gestures) and answers with an Effect
/// - Renders to a [`CalendarView`], the only data a presentation layer needs
pub trait Component: Send {
    type Props: Clone;

    type State: Clone;

    type Message: std::fmt::Debug;

    /// Create initial state from props
    fn init(&self, props: &Self::Props) -> Self::State;

    /// Update state based on a message
    fn update(&mut self, msg: Self::Message, props: &Self::Props, state: &mut Self::State) -> Effect;

    /// Render given props and state (pure)
    fn view(&self, props: &Self::Props, state: &Self::State) -> CalendarView;

    /// Lifecycle: called when the owner hands over new props
    fn did_update(
        &mut self,
        _old_props: &Self::Props,
        _new_props: &Self::Props,
        _state: &mut Self::State,
    ) -> Effect {
        Effect::None
    }
}

/// What a component asks of its owner
///
/// Components never mutate the authoritative value. They describe what
/// should happen and the owner carries it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Propose a new value to the owner
    Commit(SelectedValue),
    /// The popover should be shown
    OpenRequest,
    /// The popover should be dismissed
    CloseRequest,
    ViewOffsetChange(i32),
    DraftTextChange(String),
    Batch(Vec<Effect>),
}

impl Effect {
    /// Combine two effects, dropping `None`s
    pub fn and(self, other: Effect) -> Effect {
        match (self, other) {
            (Effect::None, e) | (e, Effect::None) => e,
            (Effect::Batch(mut effects), e) => {
                effects.push(e);
                Effect::Batch(effects)
            }
            (e, other) => Effect::Batch(vec![e, other]),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Flatten nested batches into the order they should run in
    pub fn into_vec(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::into_vec).collect(),
            effect => vec![effect],
        }
    }

    /// The committed value, if this effect (or its batch) carries one
    pub fn committed(&self) -> Option<&SelectedValue> {
        match self {
            Effect::Commit(value) => Some(value),
            Effect::Batch(effects) => effects.iter().find_map(Effect::committed),
            _ => None,
        }
    }

    /// Run every callback this effect describes, in order
    pub fn dispatch(self, callbacks: &mut impl PickerCallbacks) {
        for effect in self.into_vec() {
            match effect {
                Effect::Commit(value) => callbacks.on_commit(value),
                Effect::OpenRequest => callbacks.on_open_request(),
                Effect::CloseRequest => callbacks.on_close_request(),
                Effect::ViewOffsetChange(offset) => callbacks.on_view_offset_change(offset),
                Effect::DraftTextChange(text) => callbacks.on_draft_text_change(&text),
                Effect::None | Effect::Batch(_) => {}
            }
        }
    }
}

/// Owner-side hooks for effects; every method defaults to doing nothing
pub trait PickerCallbacks {
    fn on_commit(&mut self, _value: SelectedValue) {}

    fn on_open_request(&mut self) {}

    fn on_close_request(&mut self) {}

    fn on_view_offset_change(&mut self, _offset: i32) {}

    fn on_draft_text_change(&mut self, _text: &str) {}
}

/// Everything needed to draw the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub months: Vec<Month>,
    /// Rotated so column 0 is the configured first day of week
    pub weekday_headers: [String; 7],
    /// One title per visible month, e.g. "March 2024"
    pub month_titles: Vec<String>,
    pub draft_text: String,
    pub is_open: bool,
    pub offset: i32,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PickerCallbacks for Recorder {
        fn on_commit(&mut self, value: SelectedValue) {
            self.calls.push(format!("commit:{}", value.is_empty()));
        }

        fn on_close_request(&mut self) {
            self.calls.push("close".to_string());
        }

        fn on_draft_text_change(&mut self, text: &str) {
            self.calls.push(format!("draft:{}", text));
        }
    }

    #[test]
    fn test_and_drops_none() {
        assert_eq!(Effect::None.and(Effect::None), Effect::None);
        assert_eq!(Effect::None.and(Effect::OpenRequest), Effect::OpenRequest);
        assert_eq!(Effect::CloseRequest.and(Effect::None), Effect::CloseRequest);
    }

    #[test]
    fn test_and_builds_flat_batches() {
        let effect = Effect::OpenRequest
            .and(Effect::ViewOffsetChange(0))
            .and(Effect::DraftTextChange("x".to_string()));
        assert_eq!(
            effect,
            Effect::Batch(vec![
                Effect::OpenRequest,
                Effect::ViewOffsetChange(0),
                Effect::DraftTextChange("x".to_string()),
            ])
        );
    }

    #[test]
    fn test_into_vec_flattens_nested_batches() {
        let nested = Effect::Batch(vec![
            Effect::Batch(vec![Effect::OpenRequest, Effect::None]),
            Effect::CloseRequest,
        ]);
        assert_eq!(nested.into_vec(), vec![Effect::OpenRequest, Effect::CloseRequest]);
    }

    #[test]
    fn test_dispatch_runs_callbacks_in_order() {
        let mut recorder = Recorder::default();
        Effect::Commit(SelectedValue::default())
            .and(Effect::DraftTextChange("".to_string()))
            .and(Effect::OpenRequest)
            .and(Effect::CloseRequest)
            .dispatch(&mut recorder);
        assert_eq!(recorder.calls, vec!["commit:true", "draft:", "close"]);
    }

    #[test]
    fn test_committed_finds_value_in_batch() {
        let value = SelectedValue::Single(None);
        let effect = Effect::DraftTextChange(String::new()).and(Effect::Commit(value));
        assert_eq!(effect.committed(), Some(&value));
        assert_eq!(Effect::OpenRequest.committed(), None);
    }
}
