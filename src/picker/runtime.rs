use tracing::trace;

use super::component::{CalendarView, Component, Effect};
use super::range::RangeDatepicker;
use super::single::SingleDatepicker;

/// A mounted component: props from the owner, state kept here
///
/// The owner is expected to apply every [`Effect::Commit`] by calling
/// [`Picker::set_props`] with the new value, the way a controlled input
/// works.
pub struct Picker<C: Component> {
    component: C,
    props: C::Props,
    state: C::State,
}

pub type SinglePicker = Picker<SingleDatepicker>;
pub type RangePicker = Picker<RangeDatepicker>;

impl<C: Component> Picker<C> {
    pub fn mount(component: C, props: C::Props) -> Self {
        let state = component.init(&props);
        Self {
            component,
            props,
            state,
        }
    }

    pub fn dispatch(&mut self, msg: C::Message) -> Effect {
        trace!("ACTION: {:?}", msg);
        self.component.update(msg, &self.props, &mut self.state)
    }

    /// Hand over new props and let the component reconcile
    pub fn set_props(&mut self, props: C::Props) -> Effect {
        let old_props = std::mem::replace(&mut self.props, props);
        self.component.did_update(&old_props, &self.props, &mut self.state)
    }

    /// Edit a copy of the current props and hand it over
    pub fn update_props(&mut self, edit: impl FnOnce(&mut C::Props)) -> Effect {
        let mut next = self.props.clone();
        edit(&mut next);
        self.set_props(next)
    }

    pub fn view(&self) -> CalendarView {
        self.component.view(&self.props, &self.state)
    }

    pub fn props(&self) -> &C::Props {
        &self.props
    }

    pub fn state(&self) -> &C::State {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::picker::clock::FixedClock;
    use crate::picker::single::{SingleMsg, SingleProps};
    use crate::picker::value::start_of_day;

    #[test]
    fn test_mount_dispatch_and_set_props() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut picker = Picker::mount(
            SingleDatepicker::with_clock(Arc::new(FixedClock(today))),
            SingleProps::default(),
        );
        assert_eq!(picker.state().draft_text, "");

        let _ = picker.dispatch(SingleMsg::Open);
        assert!(picker.view().is_open);

        let date = Some(start_of_day(today));
        let effect = picker.update_props(|props| props.date = date);
        assert_eq!(picker.props().date, date);
        assert!(!effect.is_none());
        assert_eq!(picker.view().draft_text, "2024-06-15");
    }
}
