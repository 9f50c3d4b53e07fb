use std::sync::Arc;

use anyhow::{Context, Result};

use crate::commands::{parse_constraints, parse_day_or};
use crate::config::{Config, DisplayConfig};
use crate::formatting::{format_header, format_month};
use crate::picker::{
    CalendarView, Clock, DatepickerConfig, Picker, SingleDatepicker, SingleMsg, SingleProps,
    SystemClock,
};
use crate::picker::value::start_of_day;

/// Options for `datepick grid`, already merged with the config file
#[derive(Debug, Clone, Default)]
pub struct GridArgs {
    pub date: Option<String>,
    pub months: Option<usize>,
    pub first_day: Option<u8>,
    pub locale: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub disable: Vec<String>,
    pub hide_outside: bool,
}

/// Render every visible month, one under the other
pub fn format_grid(view: &CalendarView, display: &DisplayConfig) -> String {
    view.months
        .iter()
        .zip(&view.month_titles)
        .map(|(month, title)| format_month(month, title, &view.weekday_headers, display))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mount a picker on `args` and return its view
pub fn build_view(config: &Config, args: &GridArgs, clock: Arc<dyn Clock>) -> Result<CalendarView> {
    let mut overrides = config.overrides();
    if args.months.is_some() {
        overrides.months_to_display = args.months;
    }
    if args.first_day.is_some() {
        overrides.first_day_of_week = args.first_day;
    }
    let locale = args.locale.as_deref().or(config.locale.as_deref());
    let picker_config = DatepickerConfig::resolve(&overrides, locale)
        .context("Invalid calendar settings")?;

    let day = parse_day_or(args.date.as_deref(), clock.today())?;
    let constraints = parse_constraints(args.min.as_deref(), args.max.as_deref(), &args.disable)?;

    let props = SingleProps {
        date: args.date.as_ref().map(|_| start_of_day(day)),
        constraints,
        config: picker_config,
        show_outside_days: config.show_outside_days && !args.hide_outside,
        ..SingleProps::default()
    };
    let mut picker = Picker::mount(SingleDatepicker::with_clock(clock), props);
    let _ = picker.dispatch(SingleMsg::Open);
    Ok(picker.view())
}

pub fn run(config: &Config, args: GridArgs, display: &DisplayConfig) -> Result<()> {
    let view = build_view(config, &args, Arc::new(SystemClock))?;
    print!("{}", format_grid(&view, display));
    print!("\n{}", format_header("Legend", false, display));
    println!("[d] selected  d* today  dx unavailable  .d other month");
    Ok(())
}
