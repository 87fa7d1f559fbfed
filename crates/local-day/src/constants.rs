//! Millisecond constants, the default format pattern, and weekday names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LocalDayError;

pub const SECOND_MILLIS: i64 = 1_000;
pub const MINUTE_MILLIS: i64 = 60 * SECOND_MILLIS;
pub const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;
pub const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;

/// Pattern used by [`LocalDayCalculator::format_default`](crate::LocalDayCalculator::format_default).
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD";

/// A named day of the week, numbered from Sunday = 0.
///
/// Unlike [`chrono::Weekday`], the numbering starts on Sunday so that
/// [`Weekday::index`] lines up with [`chrono::Weekday::num_days_from_sunday`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// All weekdays, indexed by [`Weekday::index`].
pub const DAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// Position of this day in [`DAYS`] (Sunday = 0 .. Saturday = 6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a weekday by index. Returns `None` outside `0..=6`.
    pub fn from_index(index: usize) -> Option<Self> {
        DAYS.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = LocalDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DAYS.iter()
            .copied()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LocalDayError::InvalidDatetime(format!("unknown weekday '{}'", s)))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        DAYS[day.num_days_from_sunday() as usize]
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sunday => chrono::Weekday::Sun,
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_millis() {
        assert_eq!(DAY_MILLIS, 86_400_000);
    }

    #[test]
    fn test_index_matches_sunday_numbering() {
        for (i, day) in DAYS.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Weekday::from_index(i), Some(*day));
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_chrono_conversion_roundtrip() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::from(chrono::Weekday::Sat), Weekday::Saturday);
        for day in DAYS {
            assert_eq!(Weekday::from(chrono::Weekday::from(day)), day);
        }
    }

    #[test]
    fn test_parse_weekday_name() {
        assert_eq!("Wednesday".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!(" friday ".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_display_and_serde_use_english_name() {
        assert_eq!(Weekday::Thursday.to_string(), "Thursday");
        let json = serde_json::to_string(&Weekday::Monday).unwrap();
        assert_eq!(json, "\"Monday\"");
    }
}
