//! Events
//!
//! Everything the platform can tell the face about, plus the services it can
//! subscribe to in order to hear about them.

use time::PrimitiveDateTime;

use crate::system::bms::ChargeState;

pub const SECOND: u8 = 1;
pub const MINUTE: u8 = 2;
pub const HOUR: u8 = 4;
pub const DAY: u8 = 8;
pub const MONTH: u8 = 16;
pub const YEAR: u8 = 32;
pub const ALL: u8 = SECOND | MINUTE | HOUR | DAY | MONTH | YEAR;
pub const NONE: u8 = 0;

/// Granularity of a tick subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    pub const fn bit(self) -> u8 {
        match self {
            TimeUnit::Second => SECOND,
            TimeUnit::Minute => MINUTE,
            TimeUnit::Hour => HOUR,
            TimeUnit::Day => DAY,
            TimeUnit::Month => MONTH,
            TimeUnit::Year => YEAR,
        }
    }

    /// This unit and every coarser one
    pub const fn and_coarser(self) -> TimeUnits {
        TimeUnits(ALL & !(self.bit() - 1))
    }
}

/// The set of calendar units that changed between two ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeUnits(pub u8);

impl TimeUnits {
    /// Compare two wall clock readings
    pub fn between(prev: &PrimitiveDateTime, next: &PrimitiveDateTime) -> Self {
        let mut units = NONE;
        if prev.second() != next.second() {
            units |= SECOND;
        }
        if prev.minute() != next.minute() {
            units |= MINUTE;
        }
        if prev.hour() != next.hour() {
            units |= HOUR;
        }
        if prev.day() != next.day() {
            units |= DAY;
        }
        if prev.month() != next.month() {
            units |= MONTH;
        }
        if prev.year() != next.year() {
            units |= YEAR;
        }
        TimeUnits(units)
    }

    pub fn contains(&self, unit: TimeUnit) -> bool {
        self.0 & unit.bit() != 0
    }

    pub fn intersects(&self, other: TimeUnits) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == NONE
    }
}

/// Platform services a face can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Tick(TimeUnit),
    Battery,
    Connection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The window was pushed and is about to appear
    Load,
    /// The window left the stack
    Unload,
    Tick {
        time: PrimitiveDateTime,
        units: TimeUnits,
    },
    Battery(ChargeState),
    Connection(bool),
}

#[cfg(test)]
mod test {
    use super::*;
    use time::{Date, Month, Time};

    fn at(day: u8, hour: u8, minute: u8, second: u8) -> PrimitiveDateTime {
        PrimitiveDateTime::new(
            Date::from_calendar_date(2024, Month::March, day).unwrap(),
            Time::from_hms(hour, minute, second).unwrap(),
        )
    }

    #[test]
    fn minute_rollover() {
        let units = TimeUnits::between(&at(5, 14, 4, 59), &at(5, 14, 5, 0));
        assert!(units.contains(TimeUnit::Second));
        assert!(units.contains(TimeUnit::Minute));
        assert!(!units.contains(TimeUnit::Hour));
    }

    #[test]
    fn midnight_changes_day() {
        let units = TimeUnits::between(&at(5, 23, 59, 59), &at(6, 0, 0, 0));
        assert_eq!(units, TimeUnits(SECOND | MINUTE | HOUR | DAY));
    }

    #[test]
    fn same_time_is_empty() {
        assert!(TimeUnits::between(&at(5, 1, 2, 3), &at(5, 1, 2, 3)).is_empty());
    }

    #[test]
    fn minute_subscription_ignores_seconds() {
        let mask = TimeUnit::Minute.and_coarser();
        assert!(!TimeUnits(SECOND).intersects(mask));
        assert!(TimeUnits(MINUTE).intersects(mask));
        // an hour jump with the minute unchanged still counts
        assert!(TimeUnits(HOUR).intersects(mask));
        assert_eq!(TimeUnit::Second.and_coarser(), TimeUnits(ALL));
    }
}
