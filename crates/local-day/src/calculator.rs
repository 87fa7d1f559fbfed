//! The timezone-bound local-day calculator.
//!
//! A [`LocalDayCalculator`] resolves one UTC offset when it is built and then
//! answers every question by shifting instants by that offset. The shifted
//! value is a "local-as-UTC" millisecond count: plain UTC calendar math on it
//! (truncate to midnight, read year/month/day) gives the local answer. It is
//! never handed out as an [`Instant`]; it only turns back into one by
//! subtracting the same offset.
//!
//! # Daylight saving
//!
//! The offset is frozen at the reference instant and never recomputed per
//! query. Within one calculator a day is always exactly 24 hours. Callers
//! working on both sides of a DST transition rebind with
//! [`LocalDayCalculator::at`].

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc};

use crate::constants::{Weekday, DAY_MILLIS, DEFAULT_FORMAT};
use crate::error::{LocalDayError, Result};
use crate::format::{format_components, DateComponents};
use crate::instant::Instant;
use crate::zone::{resolve_offset, TzDatabase, ZoneLookup};

/// Local-day boundaries, components and comparisons for one timezone.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use local_day::{LocalDayCalculator, Weekday};
///
/// let reference = DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z").unwrap();
/// let sg = LocalDayCalculator::with_reference("Asia/Singapore", reference).unwrap();
///
/// let morning = DateTime::parse_from_rfc3339("2023-01-01T08:00:00+08:00").unwrap();
/// let midnight = DateTime::parse_from_rfc3339("2023-01-01T00:00:00+08:00").unwrap();
/// assert_eq!(sg.start_of_day(morning), midnight.into());
/// assert_eq!(sg.weekday(morning), Some(Weekday::Sunday));
/// assert_eq!(sg.format_default(morning).unwrap(), "2023-01-01");
/// ```
#[derive(Debug, Clone)]
pub struct LocalDayCalculator<L = TzDatabase> {
    timezone: String,
    reference: Instant,
    offset_millis: i64,
    lookup: L,
}

impl LocalDayCalculator<TzDatabase> {
    /// Calculator for `timezone`, with the offset taken at the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDayError::InvalidTimezone`] if `timezone` is not a known
    /// IANA name.
    pub fn new(timezone: &str) -> Result<Self> {
        Self::with_reference(timezone, Instant::EPOCH)
    }

    /// Calculator for `timezone`, with the offset taken at `reference`.
    pub fn with_reference(timezone: &str, reference: impl Into<Instant>) -> Result<Self> {
        Self::with_lookup(TzDatabase, timezone, reference)
    }
}

impl<L: ZoneLookup> LocalDayCalculator<L> {
    /// Calculator whose offset is resolved through a caller-supplied lookup.
    ///
    /// # Errors
    ///
    /// Whatever [`resolve_offset`] returns for this lookup, zone and reference.
    pub fn with_lookup(lookup: L, timezone: &str, reference: impl Into<Instant>) -> Result<Self> {
        let reference = reference.into();
        let offset_millis = resolve_offset(&lookup, timezone, reference)?;
        Ok(LocalDayCalculator {
            timezone: timezone.to_string(),
            reference,
            offset_millis,
            lookup,
        })
    }

    /// A new calculator for the same timezone, anchored at `reference`.
    ///
    /// This is how to stay correct across a DST transition: anchor on (or
    /// after) the transition instead of reusing one calculator for both sides.
    pub fn at(&self, reference: impl Into<Instant>) -> Result<Self>
    where
        L: Clone,
    {
        let reference = reference.into();
        tracing::debug!(
            timezone = %self.timezone,
            from = self.reference.epoch_millis(),
            to = reference.epoch_millis(),
            "rebinding local day calculator"
        );
        Self::with_lookup(self.lookup.clone(), &self.timezone, reference)
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Local-time-minus-UTC at the reference instant, in milliseconds.
    pub fn offset_millis(&self) -> i64 {
        self.offset_millis
    }

    pub fn reference(&self) -> Instant {
        self.reference
    }

    // ── Normalization ───────────────────────────────────────────────────

    /// Local-as-UTC milliseconds. Not a real instant.
    fn normalize(&self, instant: Instant) -> i64 {
        instant.epoch_millis().saturating_add(self.offset_millis)
    }

    fn normalized_datetime(&self, instant: Instant) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.normalize(instant))
    }

    /// Days since 1970-01-01 of the local date. Orders local dates the same
    /// way as `year * 10000 + month * 100 + day`.
    fn local_date_key(&self, instant: Instant) -> i64 {
        self.normalize(instant).div_euclid(DAY_MILLIS)
    }

    // ── Day boundaries ──────────────────────────────────────────────────

    /// The instant of local midnight on the day containing `instant`.
    pub fn start_of_day(&self, instant: impl Into<Instant>) -> Instant {
        let shifted = self.normalize(instant.into());
        let midnight = shifted.saturating_sub(shifted.rem_euclid(DAY_MILLIS));
        Instant::from_millis(midnight.saturating_sub(self.offset_millis))
    }

    /// Local midnight of the following day, exactly 24 hours after
    /// [`start_of_day`](Self::start_of_day).
    pub fn start_of_next_day(&self, instant: impl Into<Instant>) -> Instant {
        let start = self.start_of_day(instant).epoch_millis();
        Instant::from_millis(start.saturating_add(DAY_MILLIS))
    }

    /// Local midnight of the preceding day, exactly 24 hours before
    /// [`start_of_day`](Self::start_of_day).
    pub fn start_of_previous_day(&self, instant: impl Into<Instant>) -> Instant {
        let start = self.start_of_day(instant).epoch_millis();
        Instant::from_millis(start.saturating_sub(DAY_MILLIS))
    }

    /// The last millisecond of the local day containing `instant`.
    pub fn end_of_day(&self, instant: impl Into<Instant>) -> Instant {
        let next = self.start_of_next_day(instant).epoch_millis();
        Instant::from_millis(next.saturating_sub(1))
    }

    // ── Components ──────────────────────────────────────────────────────

    /// The local year, month (1-12) and day (1-31) of `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDayError::InvalidDatetime`] when the shifted instant is
    /// outside the range chrono can represent.
    pub fn components(&self, instant: impl Into<Instant>) -> Result<DateComponents> {
        let instant = instant.into();
        let local = self.normalized_datetime(instant).ok_or_else(|| {
            LocalDayError::InvalidDatetime(format!(
                "{} ms is outside the supported range",
                instant.epoch_millis()
            ))
        })?;

        Ok(DateComponents {
            year: local.year(),
            month: local.month(),
            day: local.day(),
        })
    }

    /// The local weekday of `instant`, or `None` if it cannot be represented.
    pub fn weekday(&self, instant: impl Into<Instant>) -> Option<Weekday> {
        let local = self.normalized_datetime(instant.into())?;
        Weekday::from_index(local.weekday().num_days_from_sunday() as usize)
    }

    /// Milliseconds elapsed since local midnight, in `0..86_400_000`.
    ///
    /// The result is unspecified for instants whose local time falls outside
    /// the range chrono can represent.
    pub fn millis_since_midnight(&self, instant: impl Into<Instant>) -> i64 {
        self.normalize(instant.into()).rem_euclid(DAY_MILLIS)
    }

    /// Render the local date of `instant` using `pattern`.
    ///
    /// `YYYY`, `YY`, `MM`, `M`, `DD` and `D` are substituted; everything else
    /// is copied through. See [`crate::format`].
    pub fn format(&self, instant: impl Into<Instant>, pattern: &str) -> Result<String> {
        let date = self.components(instant)?;
        Ok(format_components(&date, pattern))
    }

    /// [`format`](Self::format) with [`DEFAULT_FORMAT`] (`YYYY-MM-DD`).
    pub fn format_default(&self, instant: impl Into<Instant>) -> Result<String> {
        self.format(instant, DEFAULT_FORMAT)
    }

    // ── Comparisons ─────────────────────────────────────────────────────

    /// Order two instants by local calendar day, ignoring time of day.
    ///
    /// This and the `is_*` predicates below never fail, but their result is
    /// unspecified for instants whose local time falls outside the range
    /// chrono can represent (see [`weekday`](Self::weekday) for a checked query).
    pub fn compare(&self, lhs: impl Into<Instant>, rhs: impl Into<Instant>) -> Ordering {
        self.local_date_key(lhs.into())
            .cmp(&self.local_date_key(rhs.into()))
    }

    pub fn is_same(&self, lhs: impl Into<Instant>, rhs: impl Into<Instant>) -> bool {
        self.compare(lhs, rhs) == Ordering::Equal
    }

    pub fn is_same_or_before(&self, lhs: impl Into<Instant>, rhs: impl Into<Instant>) -> bool {
        self.compare(lhs, rhs) != Ordering::Greater
    }

    pub fn is_before(&self, lhs: impl Into<Instant>, rhs: impl Into<Instant>) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }

    pub fn is_after(&self, lhs: impl Into<Instant>, rhs: impl Into<Instant>) -> bool {
        self.compare(lhs, rhs) == Ordering::Greater
    }

    pub fn is_same_or_after(&self, lhs: impl Into<Instant>, rhs: impl Into<Instant>) -> bool {
        self.compare(lhs, rhs) != Ordering::Less
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
