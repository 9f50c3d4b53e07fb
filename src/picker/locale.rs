//! Locale-aware month and weekday labels.
//!
//! Names are not hardcoded: each label is produced by formatting a fixed
//! reference date with the locale's own rules. Because the reference dates
//! never change, results are memoised per locale.

use cached::proc_macro::cached;
use chrono::{Datelike, Locale, NaiveDate};
use phf::phf_map;

use super::error::{PickerError, PickerResult};

pub use cached::Cached;

/// Locale used when the caller does not name one
pub const FALLBACK_LOCALE: Locale = Locale::en_US;

/// 2024-01-01; months are labelled from the first day of each month of 2024
const MONTH_REFERENCE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid month reference date"),
};

/// 2023-12-31, a Sunday; weekdays are labelled from the week it starts
const WEEKDAY_REFERENCE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 12, 31) {
    Some(date) => date,
    None => panic!("invalid weekday reference date"),
};

/// Region picked for a bare language tag such as `fr` or `de`
static DEFAULT_REGIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "ar" => "ar_SA",
    "cs" => "cs_CZ",
    "da" => "da_DK",
    "de" => "de_DE",
    "el" => "el_GR",
    "en" => "en_US",
    "es" => "es_ES",
    "fi" => "fi_FI",
    "fr" => "fr_FR",
    "he" => "he_IL",
    "hu" => "hu_HU",
    "it" => "it_IT",
    "ja" => "ja_JP",
    "ko" => "ko_KR",
    "nb" => "nb_NO",
    "nl" => "nl_NL",
    "pl" => "pl_PL",
    "pt" => "pt_BR",
    "ro" => "ro_RO",
    "ru" => "ru_RU",
    "sv" => "sv_SE",
    "tr" => "tr_TR",
    "uk" => "uk_UA",
    "zh" => "zh_CN",
};

/// Resolve a locale identifier
///
/// Accepts POSIX names (`fr_FR`, `fr_FR.UTF-8`), BCP-47 tags (`fr-FR`) and bare
/// languages (`fr`), the latter mapped to a default region.
pub fn resolve_locale(id: &str) -> PickerResult<Locale> {
    let normalized = id.trim().replace('-', "_");
    let base = normalized
        .split_once('.')
        .map_or(normalized.as_str(), |(base, _encoding)| base);

    if let Ok(locale) = Locale::try_from(base) {
        return Ok(locale);
    }

    DEFAULT_REGIONS
        .get(base.to_lowercase().as_str())
        .and_then(|full| Locale::try_from(*full).ok())
        .ok_or_else(|| PickerError::UnknownLocale(id.to_string()))
}

/// Abbreviated month names, January first
#[cached(
    name = "MONTH_NAMES_SHORT_CACHE",
    type = "cached::SizedCache<String, [String; 12]>",
    create = "{ cached::SizedCache::with_size(32) }",
    convert = r#"{ format!("{:?}", locale) }"#
)]
pub fn month_names_short(locale: Locale) -> [String; 12] {
    month_labels(locale, "%b")
}

/// Full month names, January first
#[cached(
    name = "MONTH_NAMES_LONG_CACHE",
    type = "cached::SizedCache<String, [String; 12]>",
    create = "{ cached::SizedCache::with_size(32) }",
    convert = r#"{ format!("{:?}", locale) }"#
)]
pub fn month_names_long(locale: Locale) -> [String; 12] {
    month_labels(locale, "%B")
}

/// Abbreviated weekday names, Sunday first
#[cached(
    name = "WEEKDAY_NAMES_SHORT_CACHE",
    type = "cached::SizedCache<String, [String; 7]>",
    create = "{ cached::SizedCache::with_size(32) }",
    convert = r#"{ format!("{:?}", locale) }"#
)]
pub fn weekday_names_short(locale: Locale) -> [String; 7] {
    let mut names: [String; 7] = Default::default();
    for (slot, day) in names.iter_mut().zip(WEEKDAY_REFERENCE.iter_days()) {
        *slot = day.format_localized("%a", locale).to_string();
    }
    names
}

fn month_labels(locale: Locale, fmt: &str) -> [String; 12] {
    let firsts = MONTH_REFERENCE.iter_days().filter(|day| day.day() == 1);
    let mut names: [String; 12] = Default::default();
    for (slot, first) in names.iter_mut().zip(firsts) {
        *slot = first.format_localized(fmt, locale).to_string();
    }
    names
}
