//! General test utilities for TUI tests.
//!
//! # Usage
//!
//! ```rust
//! #[cfg(test)]
//! mod tests {
//!     use crate::tui::testing::*;
//!
//!     #[test]
//!     fn test_example() {
//!         let buf = render_widget(&widget, 34, 9);
//!         assert_eq!(buffer_lines(&buf)[0].trim(), "March 2024");
//!     }
//! }
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
};

use crate::config::DisplayConfig;
use crate::formatting::BoxChars;
use crate::tui::widgets::RenderableWidget;

/// Create a test DisplayConfig with unicode box characters
pub fn test_config() -> DisplayConfig {
    DisplayConfig {
        use_unicode: true,
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        range_fg: Color::Rgb(127, 100, 0),
        disabled_fg: Color::DarkGray,
        today_fg: Color::Cyan,
        box_chars: BoxChars::unicode(),
    }
}

/// Create a test DisplayConfig with ASCII box characters
pub fn test_config_ascii() -> DisplayConfig {
    DisplayConfig {
        use_unicode: false,
        box_chars: BoxChars::ascii(),
        ..test_config()
    }
}

/// Render a widget to a buffer and return it for testing
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    render_widget_with_config(widget, width, height, &test_config())
}

/// Render a widget to a buffer with a custom config
pub fn render_widget_with_config(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
    config: &DisplayConfig,
) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf, config);
    buf
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions; trailing spaces are ignored
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}
