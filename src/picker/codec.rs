//! Text <-> date conversion driven by a single display pattern.
//!
//! Patterns use the Unicode/date-fns field letters (`yyyy-MM-dd`,
//! `dd.MM.yy`, `MMM d, yyyy`, ...). They are compiled once into a chrono
//! strftime string and reused for both directions.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};

use super::error::{ParseFailure, PickerError, PickerResult};
use super::value::start_of_day;

/// Pattern used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// A validated date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
}

impl DatePattern {
    /// Compile a pattern, rejecting field letters this codec cannot handle
    pub fn new(pattern: &str) -> PickerResult<Self> {
        let strftime = translate(pattern)?;
        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(invalid(pattern, "not a valid format"));
        }
        Ok(Self {
            source: pattern.to_string(),
            strftime,
        })
    }

    /// The pattern as written by the caller
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Format a date; an absent date formats to empty text
    pub fn format(&self, date: Option<&NaiveDateTime>) -> String {
        date.map(|d| d.format(&self.strftime).to_string())
            .unwrap_or_default()
    }

    pub fn format_day(&self, day: NaiveDate) -> String {
        day.format(&self.strftime).to_string()
    }

    /// Parse text into a date at local midnight
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, ParseFailure> {
        NaiveDate::parse_from_str(text, &self.strftime)
            .map(start_of_day)
            .map_err(|e| ParseFailure {
                text: text.to_string(),
                pattern: self.source.clone(),
                reason: e.to_string(),
            })
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATE_FORMAT.to_string(),
            strftime: "%Y-%m-%d".to_string(),
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

pub fn format_date(date: Option<&NaiveDateTime>, pattern: &DatePattern) -> String {
    pattern.format(date)
}

pub fn parse_date(text: &str, pattern: &DatePattern) -> Result<NaiveDateTime, ParseFailure> {
    pattern.parse(text)
}

fn invalid(pattern: &str, reason: impl Into<String>) -> PickerError {
    PickerError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

/// Map one run of identical field letters to its strftime specifier
fn field(letter: char, width: usize) -> Option<&'static str> {
    let spec = match (letter, width) {
        ('y', 2) => "%y",
        ('y', 1) | ('y', 4) => "%Y",
        ('M' | 'L', 1) => "%-m",
        ('M' | 'L', 2) => "%m",
        ('M' | 'L', 3) => "%b",
        ('M' | 'L', 4) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('E', 1..=3) => "%a",
        ('E', 4) => "%A",
        _ => return None,
    };
    Some(spec)
}

fn translate(pattern: &str) -> PickerResult<String> {
    if pattern.is_empty() {
        return Err(invalid(pattern, "empty pattern"));
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // '' is a literal quote, 'text' is literal text
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            let close = chars[i + 1..]
                .iter()
                .position(|&q| q == '\'')
                .ok_or_else(|| invalid(pattern, "unterminated quote"))?;
            for &literal in &chars[i + 1..i + 1 + close] {
                push_literal(&mut out, literal);
            }
            i += close + 2;
        } else if c.is_ascii_alphabetic() {
            let width = chars[i..].iter().take_while(|&&x| x == c).count();
            let spec = field(c, width).ok_or_else(|| {
                invalid(pattern, format!("unsupported field '{}'", c.to_string().repeat(width)))
            })?;
            out.push_str(spec);
            i += width;
        } else {
            push_literal(&mut out, c);
            i += 1;
        }
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
