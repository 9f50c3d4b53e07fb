//! Headless date picker state.
//!
//! The owner holds the selected value; the controllers here only cache what
//! is displayed (draft text, visible months) and propose changes through
//! [`Effect`]s. Rendering is left to whoever consumes a [`CalendarView`].

pub mod clock;
pub mod codec;
pub mod component;
pub mod constraints;
pub mod error;
pub mod grid;
pub mod locale;
pub mod options;
pub mod range;
pub mod runtime;
pub mod single;
pub mod state;
pub mod value;
pub mod view_state;


pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{format_date, parse_date, DatePattern, DEFAULT_DATE_FORMAT};
pub use component::{CalendarView, Component, Effect, PickerCallbacks};
pub use constraints::{is_selectable, Constraints};
pub use error::{ConstraintViolation, ParseFailure, PickerError, PickerResult};
pub use grid::{build_months, DayCell, GridOptions, Month, Week};
pub use options::{ConfigOverrides, DatepickerConfig};
pub use range::{RangeClosePolicy, RangeDatepicker, RangeMsg, RangeProps, RANGE_SEPARATOR};
pub use runtime::{Picker, RangePicker, SinglePicker};
pub use single::{SingleDatepicker, SingleMsg, SingleProps};
pub use state::{EchoGuard, Phase, PickerState};
pub use value::{DateRange, SelectedValue};
pub use view_state::ViewState;
