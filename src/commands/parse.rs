use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::commands::parse_constraints;
use crate::config::Config;
use crate::picker::{Constraints, DatePattern, PickerError};
use crate::picker::range::parse_range;

/// Parse `text` exactly as the picker would when it is typed
///
/// Fails with the same silent kinds the controllers swallow, so the CLI can
/// report which one it was.
pub fn parse_text(text: &str, pattern: &DatePattern, constraints: &Constraints) -> Result<NaiveDateTime, PickerError> {
    let date = pattern.parse(text)?;
    constraints.check(&date)?;
    Ok(date)
}

/// Options for `datepick parse`
#[derive(Debug, Clone, Default)]
pub struct ParseArgs {
    pub text: String,
    pub format: Option<String>,
    pub range: bool,
    pub min: Option<String>,
    pub max: Option<String>,
    pub disable: Vec<String>,
}

pub fn run(config: &Config, args: &ParseArgs) -> Result<()> {
    let source = args.format.as_deref().unwrap_or(&config.date_format);
    let pattern = DatePattern::new(source).with_context(|| format!("Bad pattern '{}'", source))?;
    let constraints = parse_constraints(args.min.as_deref(), args.max.as_deref(), &args.disable)?;

    if args.range {
        let parsed = parse_range(&args.text, &pattern).map_err(PickerError::from)?;
        for end in [parsed.start, parsed.end].iter().flatten() {
            constraints.check(end).map_err(PickerError::from)?;
        }
        println!("start: {}", pattern.format(parsed.start.as_ref()));
        println!("end:   {}", pattern.format(parsed.end.as_ref()));
        return Ok(());
    }

    let date = parse_text(&args.text, &pattern, &constraints)?;
    println!("{}", date.date());
    Ok(())
}
