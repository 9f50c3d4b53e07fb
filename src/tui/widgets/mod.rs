/// Widget-based rendering for the picker screen
///
/// Widgets are small and focused, and render straight into a ratatui Buffer
/// from data the picker core has already computed. None of them decides
/// selectability or outside-month status; that comes from the [`CalendarView`].
///
/// [`CalendarView`]: crate::picker::CalendarView

pub mod calendar;
pub use calendar::CalendarWidget;

pub mod help_bar;
pub use help_bar::HelpBar;

pub mod trigger;
pub use trigger::TriggerWidget;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
};
use crate::config::DisplayConfig;

/// Core trait for renderable widgets
///
/// Widgets render themselves directly to a ratatui Buffer, which keeps them
/// testable against a plain test buffer.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `config` - Display configuration (colors, box chars, etc.)
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);

    /// Get the preferred height of this widget
    ///
    /// Returns None if the widget can adapt to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }

    /// Get the preferred width of this widget
    ///
    /// Returns None if the widget can adapt to any width.
    fn preferred_width(&self) -> Option<u16> {
        None
    }
}
