use anyhow::{Context, Result};

use crate::config::{Config, DisplayConfig};
use crate::formatting::{format_header, pad_left};
use crate::picker::DatepickerConfig;

const INDEX_WIDTH: usize = 2;

pub fn format_labels(config: &DatepickerConfig, display: &DisplayConfig) -> String {
    let mut output = format_header("Months", true, display);
    for (i, (short, long)) in config.month_names.iter().zip(&config.month_names_long).enumerate() {
        output.push_str(&format!("{}  {:<6} {}\n", pad_left(&(i + 1).to_string(), INDEX_WIDTH), short, long));
    }

    output.push('\n');
    output.push_str(&format_header("Weekdays", true, display));
    for (i, name) in config.weekday_names.iter().enumerate() {
        output.push_str(&format!("{}  {}\n", pad_left(&i.to_string(), INDEX_WIDTH), name));
    }
    output
}

pub fn run(config: &Config, locale: Option<&str>, display: &DisplayConfig) -> Result<()> {
    let locale = locale.or(config.locale.as_deref());
    let picker_config = DatepickerConfig::resolve(&config.overrides(), locale)
        .with_context(|| format!("Cannot load names for locale {:?}", locale))?;
    print!("{}", format_labels(&picker_config, display));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::BoxChars;
    use crate::picker::ConfigOverrides;

    #[test]
    fn test_format_labels_english() {
        let display = DisplayConfig { box_chars: BoxChars::ascii(), ..Default::default() };
        let output = format_labels(&DatepickerConfig::default(), &display);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Months");
        assert_eq!(lines[1], "======");
        assert_eq!(lines[2], " 1  Jan    January");
        assert_eq!(lines[13], "12  Dec    December");
        assert_eq!(lines[15], "Weekdays");
        assert_eq!(lines[17], " 0  Sun");
        assert_eq!(lines[23], " 6  Sat");
    }

    #[test]
    fn test_format_labels_locale() {
        let config = DatepickerConfig::resolve(&ConfigOverrides::default(), Some("de")).unwrap();
        let output = format_labels(&config, &DisplayConfig::default());
        assert!(output.contains("März"));
        assert!(output.contains(" 0  So"));
    }

    #[test]
    fn test_run_unknown_locale_fails() {
        let err = run(&Config::default(), Some("xx_YY"), &DisplayConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown locale"));
    }
}
