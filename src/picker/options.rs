use chrono::Weekday;

use super::codec::{DatePattern, DEFAULT_DATE_FORMAT};
use super::error::{PickerError, PickerResult};
use super::locale::{
    month_names_long, month_names_short, resolve_locale, weekday_names_short, FALLBACK_LOCALE,
};

/// Resolved display configuration shared by both controllers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatepickerConfig {
    pub date_format: DatePattern,
    /// Short names, January first
    pub month_names: [String; 12],
    /// Full names, January first; used for panel headers
    pub month_names_long: [String; 12],
    /// Short names, Sunday first
    pub weekday_names: [String; 7],
    pub first_day_of_week: Weekday,
    pub months_to_display: usize,
}

impl Default for DatepickerConfig {
    fn default() -> Self {
        Self {
            date_format: DatePattern::default(),
            month_names: month_names_short(FALLBACK_LOCALE),
            month_names_long: month_names_long(FALLBACK_LOCALE),
            weekday_names: weekday_names_short(FALLBACK_LOCALE),
            first_day_of_week: Weekday::Sun,
            months_to_display: 1,
        }
    }
}

/// Caller customisations; anything left `None` takes the default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub date_format: Option<String>,
    pub month_names: Option<Vec<String>>,
    pub weekday_names: Option<Vec<String>>,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: Option<u8>,
    pub months_to_display: Option<usize>,
}

impl DatepickerConfig {
    /// Merge overrides over the defaults
    ///
    /// A locale only replaces name arrays the caller has not customised.
    pub fn resolve(overrides: &ConfigOverrides, locale: Option<&str>) -> PickerResult<Self> {
        let mut config = Self::default();

        if let Some(id) = locale {
            let locale = resolve_locale(id)?;
            config.month_names = month_names_short(locale);
            config.month_names_long = month_names_long(locale);
            config.weekday_names = weekday_names_short(locale);
        }

        if let Some(pattern) = &overrides.date_format {
            config.date_format = DatePattern::new(pattern)?;
        }
        if let Some(names) = &overrides.month_names {
            config.month_names = fixed_names(names, "month_names")?;
            // custom names also title the month panels
            config.month_names_long = config.month_names.clone();
        }
        if let Some(names) = &overrides.weekday_names {
            config.weekday_names = fixed_names(names, "weekday_names")?;
        }
        if let Some(index) = overrides.first_day_of_week {
            config.first_day_of_week = weekday_from_index(index)?;
        }
        if let Some(count) = overrides.months_to_display {
            if count == 0 {
                return Err(PickerError::InvalidConfig(
                    "months_to_display must be at least 1".to_string(),
                ));
            }
            config.months_to_display = count;
        }

        Ok(config)
    }

    /// Title for a month panel, e.g. "March 2024"
    ///
    /// Uses the caller's month names when they were customised.
    pub fn month_title(&self, month0: usize, year: i32) -> String {
        let name = self
            .month_names_long
            .get(month0)
            .map(String::as_str)
            .unwrap_or_default();
        format!("{} {}", name, year)
    }
}

impl Default for ConfigOverrides {
    fn default() -> Self {
        Self {
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            month_names: None,
            weekday_names: None,
            first_day_of_week: None,
            months_to_display: None,
        }
    }
}

/// 0 = Sunday .. 6 = Saturday
pub fn weekday_from_index(index: u8) -> PickerResult<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(PickerError::InvalidConfig(format!(
            "first_day_of_week must be 0-6, got {}",
            index
        ))),
    }
}

fn fixed_names<const N: usize>(names: &[String], key: &str) -> PickerResult<[String; N]> {
    <[String; N]>::try_from(names.to_vec()).map_err(|v: Vec<String>| {
        PickerError::InvalidConfig(format!("{} needs {} entries, got {}", key, N, v.len()))
    })
}
