use std::sync::Arc;

use anyhow::{Context, Result};

use crate::commands::parse_constraints;
use crate::config::{Config, DisplayConfig};
use crate::picker::range::{format_range, parse_range};
use crate::picker::{
    Clock, DatePattern, DateRange, RangeProps, SelectedValue, SingleProps, SystemClock,
};
use crate::tui::{self, App};

#[derive(Debug, Clone, Default)]
pub struct PickArgs {
    pub range: bool,
    /// Starting value in the configured date format
    pub value: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub disable: Vec<String>,
    /// Show the calendar immediately
    pub open: bool,
}

/// Mount the requested controller with props resolved from config and flags
pub fn build_app(config: &Config, args: &PickArgs, clock: Arc<dyn Clock>) -> Result<App> {
    let picker_config = config.datepicker_config().context("Invalid picker configuration")?;
    let constraints = parse_constraints(args.min.as_deref(), args.max.as_deref(), &args.disable)?;
    let pattern = &picker_config.date_format;
    let value = args.value.as_deref().filter(|text| !text.trim().is_empty());

    let app = if args.range {
        let selected = match value {
            Some(text) => parse_range(text, pattern)
                .with_context(|| format!("Cannot read starting range '{}'", text))?,
            None => DateRange::empty(),
        };
        let props = RangeProps {
            selected,
            constraints,
            config: picker_config,
            close_policy: config.range_close_policy(),
            default_open: args.open,
            disabled: false,
            show_outside_days: config.show_outside_days,
        };
        App::range(props, config.trigger, clock)
    } else {
        let date = match value {
            Some(text) => Some(
                pattern
                    .parse(text)
                    .with_context(|| format!("Cannot read starting date '{}'", text))?,
            ),
            None => None,
        };
        let props = SingleProps {
            date,
            constraints,
            config: picker_config,
            close_on_select: config.close_on_select,
            default_open: args.open,
            disabled: false,
            show_outside_days: config.show_outside_days,
        };
        App::single(props, config.trigger, clock)
    };
    Ok(app)
}

/// Text printed for the value the user leaves the picker with
pub fn format_value(value: &SelectedValue, pattern: &DatePattern) -> String {
    match value {
        SelectedValue::Single(date) => pattern.format(date.as_ref()),
        SelectedValue::Range(range) => format_range(range, pattern),
    }
}

pub fn run(config: &Config, args: PickArgs, display: &DisplayConfig) -> Result<()> {
    let pattern = config.datepicker_config().context("Invalid picker configuration")?.date_format;
    let app = build_app(config, &args, Arc::new(SystemClock))?;
    let value = tui::run(app, display).context("Terminal error")?;
    tracing::debug!("APP: final value {:?}", value);
    println!("{}", format_value(&value, &pattern));
    Ok(())
}
