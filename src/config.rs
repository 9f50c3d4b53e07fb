use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use ratatui::style::Color;

use crate::formatting::BoxChars;
use crate::picker::{ConfigOverrides, DatepickerConfig, PickerResult, RangeClosePolicy, DEFAULT_DATE_FORMAT};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub date_format: String,
    /// e.g. "fr_FR", "fr-FR" or "fr"; unset keeps English names
    pub locale: Option<String>,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    pub months_to_display: usize,
    pub show_outside_days: bool,
    pub close_on_select: bool,
    pub range_close_on_start: bool,
    pub range_close_on_complete: bool,
    pub month_names: Option<Vec<String>>,
    pub weekday_names: Option<Vec<String>>,
    pub trigger: TriggerStyle,
    pub use_unicode: bool,
    pub theme: ThemeConfig,
}

/// How the closed picker is presented
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerStyle {
    /// A button showing the committed value
    #[default]
    Button,
    /// An editable text field
    Input,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub range_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub disabled_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub today_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            locale: None,
            first_day_of_week: 0,
            months_to_display: 1,
            show_outside_days: true,
            close_on_select: true,
            range_close_on_start: false,
            range_close_on_complete: true,
            month_names: None,
            weekday_names: None,
            trigger: TriggerStyle::default(),
            use_unicode: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            range_fg: None,
            disabled_fg: Color::DarkGray,
            today_fg: Color::Cyan,
        }
    }
}

impl ThemeConfig {
    /// Colour for days strictly inside a range, 50% darker than the selection if not set
    pub fn range_fg(&self) -> Color {
        self.range_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

impl Config {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            date_format: Some(self.date_format.clone()),
            month_names: self.month_names.clone(),
            weekday_names: self.weekday_names.clone(),
            first_day_of_week: Some(self.first_day_of_week),
            months_to_display: Some(self.months_to_display),
        }
    }

    pub fn datepicker_config(&self) -> PickerResult<DatepickerConfig> {
        DatepickerConfig::resolve(&self.overrides(), self.locale.as_deref())
    }

    pub fn range_close_policy(&self) -> RangeClosePolicy {
        RangeClosePolicy {
            on_start: self.range_close_on_start,
            on_complete: self.range_close_on_complete,
        }
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            use_unicode: self.use_unicode,
            selection_fg: self.theme.selection_fg,
            range_fg: self.theme.range_fg(),
            disabled_fg: self.theme.disabled_fg,
            today_fg: self.theme.today_fg,
            box_chars: BoxChars::from_use_unicode(self.use_unicode),
        }
    }
}

/// Rendering settings handed to widgets
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    pub selection_fg: Color,
    pub range_fg: Color,
    pub disabled_fg: Color,
    pub today_fg: Color,
    pub box_chars: BoxChars,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Config::default().display()
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|color_str| {
        parse_color(&color_str)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))
    })
    .transpose()
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "cyan", "darkgray", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    let hex = s.strip_prefix('#').filter(|hex| hex.is_ascii())?;
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => Some(Color::Rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        _ => None,
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("CONFIG: ignoring {}: {}", config_path.display(), e);
        Config::default()
    })
}
