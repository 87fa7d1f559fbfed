//! Timezone database access and construction-time offset resolution.
//!
//! The calculator never asks the timezone database anything after it is
//! built. The only question it asks is "what does the wall clock in zone `Z`
//! read at instant `t`?", answered by a [`ZoneLookup`]. [`TzDatabase`] answers
//! it from the IANA data compiled into `chrono-tz`; tests substitute fixed
//! answers.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;

use crate::constants::SECOND_MILLIS;
use crate::error::{LocalDayError, Result};
use crate::instant::Instant;

/// Civil (wall-clock) fields as reported by a timezone database.
///
/// Every field is optional because a lookup may report only part of a
/// date-time. [`resolve_offset`] rejects anything incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CivilFields {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// `0..=23`, or `24` for facilities that render midnight as hour 24.
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl CivilFields {
    /// Capture all six fields of a zoned (or naive) datetime.
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        CivilFields {
            year: Some(dt.year()),
            month: Some(dt.month()),
            day: Some(dt.day()),
            hour: Some(dt.hour()),
            minute: Some(dt.minute()),
            second: Some(dt.second()),
        }
    }

    /// Reassemble the fields into a naive datetime.
    fn to_naive(self, timezone: &str) -> Result<NaiveDateTime> {
        let missing = |field: &str| {
            LocalDayError::InvalidDatetime(format!(
                "timezone '{}' did not report a civil {}",
                timezone, field
            ))
        };

        let year = self.year.ok_or_else(|| missing("year"))?;
        let month = self.month.ok_or_else(|| missing("month"))?;
        let day = self.day.ok_or_else(|| missing("day"))?;
        let mut hour = self.hour.ok_or_else(|| missing("hour"))?;
        let minute = self.minute.ok_or_else(|| missing("minute"))?;
        let second = self.second.ok_or_else(|| missing("second"))?;

        if hour == 24 {
            tracing::trace!(timezone, "folding civil hour 24 to 0");
            hour = 0;
        }

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            LocalDayError::InvalidDatetime(format!("{:04}-{:02}-{:02}", year, month, day))
        })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            LocalDayError::InvalidDatetime(format!("{:02}:{:02}:{:02}", hour, minute, second))
        })?;

        Ok(date.and_time(time))
    }
}

/// Answers "what does the wall clock in `timezone` read at `instant`?".
pub trait ZoneLookup {
    /// Civil fields for `instant` in `timezone`.
    ///
    /// # Errors
    ///
    /// Implementations return [`LocalDayError::InvalidTimezone`] for a zone
    /// they do not know, and [`LocalDayError::InvalidDatetime`] for an
    /// instant they cannot place.
    fn civil_fields(&self, timezone: &str, instant: Instant) -> Result<CivilFields>;
}

impl<L: ZoneLookup + ?Sized> ZoneLookup for &L {
    fn civil_fields(&self, timezone: &str, instant: Instant) -> Result<CivilFields> {
        (**self).civil_fields(timezone, instant)
    }
}

/// [`ZoneLookup`] backed by the IANA timezone database bundled with `chrono-tz`.
///
/// Accepts IANA names (`"America/Los_Angeles"`) and the fixed-offset
/// pseudo-zones (`"Etc/GMT-12"`, `"UTC"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TzDatabase;

impl ZoneLookup for TzDatabase {
    fn civil_fields(&self, timezone: &str, instant: Instant) -> Result<CivilFields> {
        let tz = parse_timezone(timezone)?;
        let utc = instant.to_utc().ok_or_else(|| {
            LocalDayError::InvalidDatetime(format!(
                "{} ms is outside the supported range",
                instant.epoch_millis()
            ))
        })?;
        Ok(CivilFields::from_datetime(&utc.with_timezone(&tz)))
    }
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| LocalDayError::InvalidTimezone(format!("'{}'", s)))
}

/// Local-time-minus-UTC, in milliseconds, for `timezone` at `reference`.
///
/// The civil fields at `reference` are reinterpreted as UTC fields and the
/// reference instant (truncated to whole seconds, since civil fields carry no
/// sub-second part) is subtracted from the result.
///
/// # Errors
///
/// Propagates lookup errors, and returns [`LocalDayError::InvalidDatetime`] if
/// the lookup reports an incomplete or impossible civil date-time.
///
/// # Examples
///
/// ```
/// use local_day::{resolve_offset, Instant, TzDatabase};
///
/// let offset = resolve_offset(&TzDatabase, "Asia/Kathmandu", Instant::from_millis(1_672_531_200_000)).unwrap();
/// assert_eq!(offset, (5 * 60 + 45) * 60 * 1000);
/// ```
pub fn resolve_offset<L: ZoneLookup + ?Sized>(
    lookup: &L,
    timezone: &str,
    reference: Instant,
) -> Result<i64> {
    let fields = lookup.civil_fields(timezone, reference)?;
    let local_as_utc = fields.to_naive(timezone)?.and_utc().timestamp_millis();
    let reference_millis = reference.epoch_millis().div_euclid(SECOND_MILLIS) * SECOND_MILLIS;
    let offset_millis = local_as_utc - reference_millis;

    tracing::debug!(
        timezone,
        reference = reference.epoch_millis(),
        offset_millis,
        "resolved local day offset"
    );

    Ok(offset_millis)
}
