use chrono::Datelike;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::DisplayConfig;
use crate::layout_constants::{DAY_CELL_GAP, MONTH_WIDTH, WEEKDAY_HEADER_WIDTH};
use crate::picker::{DayCell, Month};

/// Box-drawing characters for borders and underlines
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChars {
    pub horizontal: String,
    pub double_horizontal: String,
    pub vertical: String,
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
    pub selector: String,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            horizontal: "─".to_string(),
            double_horizontal: "═".to_string(),
            vertical: "│".to_string(),
            top_left: "╭".to_string(),
            top_right: "╮".to_string(),
            bottom_left: "╰".to_string(),
            bottom_right: "╯".to_string(),
            selector: "►".to_string(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: "-".to_string(),
            double_horizontal: "=".to_string(),
            vertical: "|".to_string(),
            top_left: "+".to_string(),
            top_right: "+".to_string(),
            bottom_left: "+".to_string(),
            bottom_right: "+".to_string(),
            selector: ">".to_string(),
        }
    }

    pub fn from_use_unicode(use_unicode: bool) -> Self {
        if use_unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Format a header with text and an underline of the same display width
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses double-line (═/=), otherwise single-line (─/-)
/// * `display` - Display configuration to determine unicode vs ASCII
pub fn format_header(text: &str, double_line: bool, display: &DisplayConfig) -> String {
    let separator_char = if double_line {
        &display.box_chars.double_horizontal
    } else {
        &display.box_chars.horizontal
    };
    format!("{}\n{}\n", text, separator_char.repeat(text.width()))
}

/// Cut `text` to at most `width` display columns
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

/// Right-align `text` in `width` display columns
pub fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(pad), text)
}

/// Plain-text day cell, e.g. "  5 ", "[ 5]", "( 6)", "  7*", "  8x"
///
/// Left marker: `[` selected, `(` inside a range, `.` outside the month.
/// Right marker: `]` / `)` to match, `x` not selectable, `*` today.
pub fn format_cell(cell: &DayCell) -> String {
    let (left, right) = if cell.selected {
        ('[', ']')
    } else if cell.in_range {
        ('(', ')')
    } else {
        let left = if cell.outside_month { '.' } else { ' ' };
        let right = if !cell.selectable {
            'x'
        } else if cell.today {
            '*'
        } else {
            ' '
        };
        (left, right)
    };
    format!("{}{:>2}{}", left, cell.date.day(), right)
}

/// Weekday header row aligned to the day cells
pub fn format_weekday_row(headers: &[String; 7]) -> String {
    headers
        .iter()
        .map(|name| pad_left(&truncate_to_width(name, WEEKDAY_HEADER_WIDTH), WEEKDAY_HEADER_WIDTH + 1))
        .collect::<Vec<_>>()
        .join(&" ".repeat(DAY_CELL_GAP))
}

/// A whole month as text: centred title, underline, weekday row, weeks
pub fn format_month(month: &Month, title: &str, headers: &[String; 7], display: &DisplayConfig) -> String {
    let title_pad = MONTH_WIDTH.saturating_sub(title.width()) / 2;
    let mut output = format!(
        "{}{}\n{}\n",
        " ".repeat(title_pad),
        title,
        display.box_chars.horizontal.repeat(MONTH_WIDTH)
    );
    output.push_str(format_weekday_row(headers).trim_end());
    output.push('\n');

    for week in &month.weeks {
        let row = week
            .cells
            .iter()
            .map(|cell| match cell {
                Some(cell) => format_cell(cell),
                None => "    ".to_string(),
            })
            .collect::<Vec<_>>()
            .join(&" ".repeat(DAY_CELL_GAP));
        output.push_str(row.trim_end());
        output.push('\n');
    }
    output
}
