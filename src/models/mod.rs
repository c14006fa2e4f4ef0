//! Domain models.
//!
//! Core data types for instructor schedule tracking: the raw entry row, the
//! instructor roster, and clock-time parsing/derivation. Everything derived
//! (end times, workload totals, the recap pivot) is computed from these by
//! the validation and aggregate modules; nothing derived is stored here.

mod clock;
mod entry;
mod roster;

pub use clock::{derive_end_time, parse_date, parse_units, ClockTime, DATE_FORMAT, TIME_FORMAT};
pub use entry::{EntryField, ScheduleEntry};
pub use roster::Roster;
