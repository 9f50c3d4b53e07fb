/// Calendar widget - the visible months of a [`CalendarView`] side by side
///
/// Each month is a title row (with `<`/`>` when navigation is possible), an
/// underline, the weekday header and up to six week rows. Styling comes from
/// the flags already on each [`DayCell`]; the widget adds only the cursor and
/// the hover preview.

use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::formatting::format_weekday_row;
use crate::layout_constants::{DAY_CELL_GAP, DAY_CELL_WIDTH, MONTH_GAP, MONTH_HEIGHT, MONTH_WIDTH};
use crate::picker::{CalendarView, DayCell, Month};
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct CalendarWidget<'a> {
    pub view: &'a CalendarView,
    /// Day under the keyboard cursor, if the calendar has focus
    pub cursor: Option<NaiveDate>,
    /// Inclusive preview of an in-progress range
    pub preview: Option<(NaiveDate, NaiveDate)>,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(view: &'a CalendarView) -> Self {
        Self {
            view,
            cursor: None,
            preview: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<NaiveDate>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_preview(mut self, preview: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.preview = preview;
        self
    }

    fn in_preview(&self, date: NaiveDate) -> bool {
        self.preview
            .is_some_and(|(start, end)| start <= date && date <= end)
    }

    fn cell_style(&self, cell: &DayCell, config: &DisplayConfig) -> Style {
        let mut style = Style::default();
        if cell.outside_month {
            style = style.fg(Color::DarkGray);
        }
        if cell.today {
            style = style.fg(config.today_fg).add_modifier(Modifier::UNDERLINED);
        }
        if cell.in_range || self.in_preview(cell.date) {
            style = style.fg(config.range_fg);
        }
        if cell.selected {
            style = style.fg(config.selection_fg).add_modifier(Modifier::BOLD);
        }
        if !cell.selectable {
            style = style.fg(config.disabled_fg).add_modifier(Modifier::CROSSED_OUT);
        }
        if self.cursor == Some(cell.date) && !cell.outside_month {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    fn render_title(&self, index: usize, x: u16, y: u16, width: u16, buf: &mut Buffer) {
        let Some(title) = self.view.month_titles.get(index) else {
            return;
        };
        let pad = (width as usize).saturating_sub(title.width()) / 2;
        buf.set_string(x + pad as u16, y, title, Style::default().add_modifier(Modifier::BOLD));

        if index == 0 && self.view.can_go_back {
            buf.set_string(x, y, "<", Style::default());
        }
        if index + 1 == self.view.months.len() && self.view.can_go_forward {
            buf.set_string(x + width.saturating_sub(1), y, ">", Style::default());
        }
    }

    fn render_month(&self, index: usize, month: &Month, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let width = area.width.min(MONTH_WIDTH as u16);
        self.render_title(index, area.x, area.y, width, buf);

        if area.height > 1 {
            let underline = config.box_chars.horizontal.repeat(width as usize);
            buf.set_string(area.x, area.y + 1, underline, Style::default());
        }
        if area.height > 2 {
            let header = format_weekday_row(&self.view.weekday_headers);
            buf.set_stringn(area.x, area.y + 2, header, width as usize, Style::default().fg(Color::Gray));
        }

        for (row, week) in month.weeks.iter().enumerate() {
            let y = area.y + 3 + row as u16;
            if y >= area.bottom() {
                break;
            }
            for (col, cell) in week.cells.iter().enumerate() {
                let Some(cell) = cell else {
                    continue;
                };
                let x = area.x + (col * (DAY_CELL_WIDTH + DAY_CELL_GAP)) as u16;
                if x + DAY_CELL_WIDTH as u16 > area.right() {
                    break;
                }
                let text = format!(" {:>2} ", cell.date.day());
                buf.set_string(x, y, text, self.cell_style(cell, config));
            }
        }
    }
}

impl RenderableWidget for CalendarWidget<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let stride = MONTH_WIDTH as u16 + MONTH_GAP;
        for (index, month) in self.view.months.iter().enumerate() {
            let x = area.x + stride * index as u16;
            if x >= area.right() {
                break;
            }
            let month_area = Rect::new(x, area.y, area.right() - x, area.height).intersection(area);
            self.render_month(index, month, month_area, buf, config);
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(MONTH_HEIGHT)
    }

    fn preferred_width(&self) -> Option<u16> {
        let months = self.view.months.len() as u16;
        Some(months * MONTH_WIDTH as u16 + months.saturating_sub(1) * MONTH_GAP)
    }
}
