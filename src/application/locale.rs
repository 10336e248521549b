//! Month and week day names

use time::{Month, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    French,
    German,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

// Monday first, matching `Weekday::number_days_from_monday`
const DAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const DAYS_FR: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const DAYS_DE: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];

impl Language {
    /// Pick a language from a POSIX style locale such as `fr_FR`.
    ///
    /// Anything unrecognised falls back to English.
    pub fn from_locale(locale: &str) -> Self {
        match locale.get(..2) {
            Some(code) if code.eq_ignore_ascii_case("fr") => Language::French,
            Some(code) if code.eq_ignore_ascii_case("de") => Language::German,
            _ => Language::English,
        }
    }

    pub fn month(self, month: Month) -> &'static str {
        let idx = u8::from(month) as usize - 1;
        match self {
            Language::English => MONTHS_EN[idx],
            Language::French => MONTHS_FR[idx],
            Language::German => MONTHS_DE[idx],
        }
    }

    pub fn week_day(self, day: Weekday) -> &'static str {
        let idx = day.number_days_from_monday() as usize;
        match self {
            Language::English => DAYS_EN[idx],
            Language::French => DAYS_FR[idx],
            Language::German => DAYS_DE[idx],
        }
    }
}
