//! # local-day
//!
//! Timezone-correct local calendar days without a full date-arithmetic library.
//!
//! A [`LocalDayCalculator`] is bound to one IANA timezone. It resolves that
//! zone's UTC offset once, at a reference instant, and then answers local-day
//! questions about any instant with integer arithmetic: where the local day
//! starts and ends, which year/month/day and weekday it is, and whether two
//! instants fall on the same local day.
//!
//! The offset is frozen at construction. Rebind with
//! [`LocalDayCalculator::at`] to work on the other side of a DST transition.
//!
//! ## Modules
//!
//! - [`calculator`] — The timezone-bound local-day calculator
//! - [`zone`] — Timezone lookups and construction-time offset resolution
//! - [`format`] — `YYYY-MM-DD`-style pattern formatting
//! - [`instant`] — Epoch-millisecond instants
//! - [`constants`] — Millisecond constants, default pattern, weekday names
//! - [`error`] — Error types

pub mod calculator;
pub mod constants;
pub mod error;
pub mod format;
pub mod instant;
pub mod zone;

pub use calculator::LocalDayCalculator;
pub use constants::{Weekday, DAYS, DAY_MILLIS, DEFAULT_FORMAT};
pub use error::{LocalDayError, Result};
pub use format::DateComponents;
pub use instant::Instant;
pub use zone::{resolve_offset, CivilFields, TzDatabase, ZoneLookup};
