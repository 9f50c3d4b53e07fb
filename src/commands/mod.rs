pub mod grid;
pub mod labels;
pub mod parse;
pub mod pick;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::picker::Constraints;

/// Parse a YYYY-MM-DD command-line date
pub fn parse_day(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}

/// Parse an optional date, defaulting to `today`
pub fn parse_day_or(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    date.map(parse_day).transpose().map(|day| day.unwrap_or(today))
}

/// Build constraints from `--min`, `--max` and repeated `--disable`
pub fn parse_constraints(min: Option<&str>, max: Option<&str>, disable: &[String]) -> Result<Constraints> {
    let mut constraints = Constraints::new();
    if let Some(min) = min {
        constraints = constraints.with_min(parse_day(min).context("Bad --min")?);
    }
    if let Some(max) = max {
        constraints = constraints.with_max(parse_day(max).context("Bad --max")?);
    }
    let disabled = disable
        .iter()
        .map(|day| parse_day(day))
        .collect::<Result<Vec<_>>>()
        .context("Bad --disable")?;
    Ok(constraints.disable_all(disabled))
}
