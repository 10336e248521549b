//! Clock text
//!
//! Formats a broken down time into the three strings shown on the face. Each
//! string lives in a fixed capacity buffer; text that does not fit is cut at
//! the last whole character.

use core::fmt::Write;

use heapless::String;
use time::{Date, PrimitiveDateTime};

use crate::application::locale::Language;

/// Capacity, in bytes, of the time buffer
pub const TIME_LEN: usize = 8;
/// Capacity, in bytes, of the date buffer
pub const DATE_LEN: usize = 12;
/// Capacity, in bytes, of the week day buffer
pub const WEEK_DAY_LEN: usize = 15;

pub type TimeText = String<TIME_LEN>;
pub type DateText = String<DATE_LEN>;
pub type WeekDayText = String<WEEK_DAY_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourStyle {
    TwelveHour,
    TwentyFourHour,
}

impl HourStyle {
    pub fn from_24h(is_24h: bool) -> Self {
        if is_24h {
            HourStyle::TwentyFourHour
        } else {
            HourStyle::TwelveHour
        }
    }
}

/// The three strings of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockText {
    pub time: TimeText,
    pub date: DateText,
    pub week_day: WeekDayText,
}

impl ClockText {
    pub fn new(now: &PrimitiveDateTime, style: HourStyle, language: Language) -> Self {
        Self {
            time: format_time(now, style),
            date: format_date(now.date(), language),
            week_day: format_week_day(now.date(), language),
        }
    }
}

/// `HH:MM`, or `II:MM` with the hour on a 1 - 12 dial
pub fn format_time(now: &PrimitiveDateTime, style: HourStyle) -> TimeText {
    let hour = match style {
        HourStyle::TwentyFourHour => now.hour(),
        HourStyle::TwelveHour => match now.hour() % 12 {
            0 => 12,
            h => h,
        },
    };
    let mut buffer = String::new();
    if write!(buffer, "{:02}:{:02}", hour, now.minute()).is_err() {
        warn!("time {:?} does not fit, showing {:?}", now.time(), buffer.as_str());
    }
    buffer
}

/// Full month name then the zero padded day, e.g `March 05`
pub fn format_date(date: Date, language: Language) -> DateText {
    let mut buffer = String::new();
    push_fitting(&mut buffer, language.month(date.month()));
    if write!(buffer, " {:02}", date.day()).is_err() {
        warn!("no room for the day in {:?}", buffer.as_str());
    }
    buffer
}

/// Full week day name
pub fn format_week_day(date: Date, language: Language) -> WeekDayText {
    let mut buffer = String::new();
    push_fitting(&mut buffer, language.week_day(date.weekday()));
    buffer
}

/// Append as much of `s` as fits, never splitting a character
fn push_fitting<const N: usize>(buffer: &mut String<N>, s: &str) {
    for c in s.chars() {
        if buffer.push(c).is_err() {
            trace!("text truncated to {:?}", buffer.as_str());
            return;
        }
    }
}
