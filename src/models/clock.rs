//! Clock times and end-time derivation.
//!
//! Session times are entered as `HH:MM` wall-clock strings and dates as
//! `DD-MM-YYYY`. The derived end of a session is `start + units × unit_minutes`,
//! which may run past midnight; such ends are kept as raw elapsed clock time
//! (hour field ≥ 24) rather than wrapped to the next day, so interval
//! comparisons within one day stay a simple integer compare.
//!
//! # Parsing policy
//! Parsers here are total: malformed text yields `None`, never an error or
//! panic. Incomplete rows are a normal state of the store and are simply
//! excluded from derivation until they parse.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used across the store, the document, and the recap: `19-10-2026`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Time-of-day format for session starts: `14:00` (24-hour).
pub const TIME_FORMAT: &str = "%H:%M";

/// A clock time as minutes since midnight.
///
/// Start times always fall in `00:00..24:00`. Derived end times are allowed
/// to exceed 24 hours and display as e.g. `25:30` (no wraparound).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Creates a clock time from hours and minutes.
    pub fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(hours * 60 + minutes)
    }

    /// Parses `HH:MM` (24-hour). Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let t = NaiveTime::parse_from_str(text.trim(), TIME_FORMAT).ok()?;
        Some(Self(t.hour() * 60 + t.minute()))
    }

    /// Total minutes since midnight.
    #[inline]
    pub fn total_minutes(&self) -> u32 {
        self.0
    }

    /// This time shifted forward by `minutes`. Does not wrap at midnight;
    /// saturates instead of overflowing on absurd inputs.
    #[inline]
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Parses a `DD-MM-YYYY` date. Returns `None` for anything else.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Parses a non-negative integer unit count. Returns `None` for anything else.
///
/// Negative counts are rejected here rather than clamped: a `-3` in the
/// duration column is operator error, not a zero-length session.
pub fn parse_units(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

/// Derives a session's end time from its start, unit count, and the global
/// minutes-per-unit setting.
///
/// Pure and total over valid inputs; the result may exceed 24:00.
pub fn derive_end_time(start: ClockTime, units: u32, unit_minutes: u32) -> ClockTime {
    start.plus_minutes(units.saturating_mul(unit_minutes))
}
