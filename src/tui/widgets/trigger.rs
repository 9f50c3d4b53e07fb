/// Trigger widget - the boxed field that opens the popover
///
/// Renders as a three-row box with the label set into the top border:
///
///   ╭─ Date ─────────────╮
///   │►2024-03-05_        │
///   ╰────────────────────╯
///
/// Input-style triggers show a `_` cursor after the text while focused.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::{DisplayConfig, TriggerStyle};
use crate::formatting::truncate_to_width;
use crate::layout_constants::{TRIGGER_HEIGHT, TRIGGER_MIN_WIDTH};
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct TriggerWidget<'a> {
    pub label: &'a str,
    pub text: &'a str,
    /// Shown dimmed when `text` is empty
    pub placeholder: &'a str,
    pub focused: bool,
    pub style: TriggerStyle,
}

impl<'a> TriggerWidget<'a> {
    pub fn new(label: &'a str, text: &'a str, style: TriggerStyle) -> Self {
        Self {
            label,
            text,
            placeholder: "",
            focused: false,
            style,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn border_style(&self, config: &DisplayConfig) -> Style {
        if self.focused {
            Style::default().fg(config.selection_fg)
        } else {
            Style::default()
        }
    }

    fn render_border(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let chars = &config.box_chars;
        let style = self.border_style(config);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        for x in area.x + 1..right {
            buf.set_string(x, area.y, &chars.horizontal, style);
            buf.set_string(x, bottom, &chars.horizontal, style);
        }
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, &chars.vertical, style);
            buf.set_string(right, y, &chars.vertical, style);
        }
        buf.set_string(area.x, area.y, &chars.top_left, style);
        buf.set_string(right, area.y, &chars.top_right, style);
        buf.set_string(area.x, bottom, &chars.bottom_left, style);
        buf.set_string(right, bottom, &chars.bottom_right, style);

        if !self.label.is_empty() && area.width > 6 {
            let label = truncate_to_width(self.label, area.width as usize - 6);
            buf.set_string(area.x + 2, area.y, format!(" {} ", label), style.add_modifier(Modifier::BOLD));
        }
    }
}

impl RenderableWidget for TriggerWidget<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width < 4 || area.height < TRIGGER_HEIGHT {
            return;
        }
        self.render_border(area, buf, config);

        let y = area.y + 1;
        let inner = (area.width - 3) as usize;
        if self.focused {
            buf.set_string(area.x + 1, y, &config.box_chars.selector, Style::default().fg(config.selection_fg));
        }

        let (content, style) = if self.text.is_empty() {
            (self.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (self.text, Style::default())
        };
        let show_cursor = self.focused && self.style == TriggerStyle::Input;
        // keep room for the cursor and show the tail of long input
        let budget = if show_cursor { inner.saturating_sub(1) } else { inner };
        let visible = if content.width() > budget && show_cursor {
            let skip = content.chars().count().saturating_sub(budget);
            content.chars().skip(skip).collect()
        } else {
            truncate_to_width(content, budget)
        };
        buf.set_string(area.x + 2, y, &visible, style);

        if show_cursor {
            let x = area.x + 2 + visible.width() as u16;
            buf.set_string(x, y, "_", Style::default().add_modifier(Modifier::SLOW_BLINK));
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(TRIGGER_HEIGHT)
    }

    fn preferred_width(&self) -> Option<u16> {
        Some((self.text.width() as u16 + 4).max(TRIGGER_MIN_WIDTH))
    }
}
