/// HelpBar widget - key hints for whatever currently has focus
///
/// Hints are rendered as "[Key] label" pairs separated by the vertical box
/// character, keys in the selection color and labels dimmed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};

use crate::config::{DisplayConfig, TriggerStyle};
use crate::tui::app::Focus;
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct HelpBar {
    pub open: bool,
    pub focus: Focus,
    pub style: TriggerStyle,
}

impl HelpBar {
    pub fn new(open: bool, focus: Focus, style: TriggerStyle) -> Self {
        Self { open, focus, style }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match (self.open, self.focus, self.style) {
            (true, Focus::Calendar, _) => vec![
                ("←↑↓→", "Move"),
                ("Enter", "Pick"),
                ("< >", "Month"),
                ("Tab", "Text"),
                ("Esc", "Close"),
            ],
            (true, Focus::Input, _) => vec![
                ("Type", "Edit"),
                ("Tab", "Calendar"),
                ("^U", "Clear"),
                ("Esc", "Close"),
            ],
            (false, _, TriggerStyle::Input) => vec![
                ("Type", "Edit"),
                ("Enter", "Open"),
                ("^U", "Clear"),
                ("Esc", "Done"),
            ],
            (false, _, TriggerStyle::Button) => vec![("Enter", "Open"), ("^U", "Clear"), ("Esc", "Done")],
        }
    }
}

impl RenderableWidget for HelpBar {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let key_style = Style::default().fg(config.selection_fg);
        let label_style = Style::default().fg(Color::DarkGray);
        let separator = format!(" {} ", config.box_chars.vertical);

        let mut x = area.x;
        for (idx, (key, label)) in self.hints().into_iter().enumerate() {
            let mut segments = Vec::with_capacity(3);
            if idx > 0 {
                segments.push((separator.clone(), label_style));
            }
            segments.push((format!("[{}]", key), key_style));
            segments.push((format!(" {}", label), label_style));

            for (text, style) in segments {
                if x >= area.right() {
                    return;
                }
                let room = (area.right() - x) as usize;
                let (next_x, _) = buf.set_stringn(x, area.y, &text, room, style);
                x = next_x;
            }
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(1)
    }
}
