//! Instants as signed milliseconds since the Unix epoch.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LocalDayError;

/// A point in time, stored as milliseconds since `1970-01-01T00:00:00Z`.
///
/// Every calculator operation takes `impl Into<Instant>`, so callers can pass
/// raw epoch milliseconds or any `chrono::DateTime`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// The Unix epoch, the default reference instant.
    pub const EPOCH: Instant = Instant(0);

    pub const fn from_millis(millis: i64) -> Self {
        Instant(millis)
    }

    pub const fn epoch_millis(self) -> i64 {
        self.0
    }

    /// This instant as a chrono UTC datetime, or `None` if chrono cannot
    /// represent it.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<i64> for Instant {
    fn from(millis: i64) -> Self {
        Instant(millis)
    }
}

impl From<Instant> for i64 {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Instant {
    fn from(dt: DateTime<Tz>) -> Self {
        Instant(dt.timestamp_millis())
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Instant {
    fn from(dt: &DateTime<Tz>) -> Self {
        Instant(dt.timestamp_millis())
    }
}

impl TryFrom<SystemTime> for Instant {
    type Error = LocalDayError;

    fn try_from(time: SystemTime) -> Result<Self, Self::Error> {
        let out_of_range =
            || LocalDayError::InvalidDatetime(format!("{:?} does not fit in i64 millis", time));
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis())
                .map(Instant)
                .map_err(|_| out_of_range()),
            // Pre-epoch times round toward negative infinity.
            Err(before) => {
                let before = before.duration();
                let mut millis = i64::try_from(before.as_millis()).map_err(|_| out_of_range())?;
                if before.subsec_nanos() % 1_000_000 != 0 {
                    millis = millis.checked_add(1).ok_or_else(out_of_range)?;
                }
                Ok(Instant(-millis))
            }
        }
    }
}
