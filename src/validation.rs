//! Schedule-integrity validation.
//!
//! Detects double-booking: two sessions of the same instructor on the same
//! day whose occupied time intervals overlap. Intervals are half-open
//! `[start, end)`, so a session ending at 10:00 and one starting at 10:00
//! coexist.
//!
//! Validation is permissive until a row is complete: while any of the
//! instructor, date, start, or duration fields is missing or unparseable,
//! the row neither triggers nor blocks a conflict. Incomplete rows are a
//! normal editing state, reported (if at all) as format problems through a
//! separate channel, never as conflicts.

use crate::models::{ClockTime, ScheduleEntry};

/// A detected double-booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    /// Instructor being double-booked.
    pub instructor: String,
    /// Day of the collision, `DD-MM-YYYY`.
    pub date: String,
    /// Position of the already-stored colliding entry.
    pub other_index: usize,
    /// Human-readable description of the collision.
    pub message: String,
}

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
///
/// Symmetric by construction; touching endpoints do not overlap.
#[inline]
pub fn intervals_overlap(a: (ClockTime, ClockTime), b: (ClockTime, ClockTime)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Scans `entries` for a session colliding with `candidate`.
///
/// `editing` is the position of the entry being edited, excluded from the
/// scan so a row never conflicts with its own previous value; `None` means
/// the candidate is a prospective new row.
///
/// Returns the first collision found, or `None` when the candidate is clear
/// or not yet schedulable. Scan order is front to back, but the overlap
/// predicate is symmetric so the set of colliding pairs does not depend on
/// order.
pub fn would_conflict(
    entries: &[ScheduleEntry],
    editing: Option<usize>,
    candidate: &ScheduleEntry,
    unit_minutes: u32,
) -> Option<ConflictReport> {
    if !candidate.is_schedulable() {
        return None;
    }
    let date = candidate.parsed_date()?;
    let interval = candidate.interval(unit_minutes)?;

    for (index, other) in entries.iter().enumerate() {
        if Some(index) == editing {
            continue;
        }
        if other.instructor_name != candidate.instructor_name {
            continue;
        }
        if !other.is_schedulable() || other.parsed_date() != Some(date) {
            continue;
        }
        let other_interval = match other.interval(unit_minutes) {
            Some(iv) => iv,
            None => continue,
        };
        if intervals_overlap(interval, other_interval) {
            return Some(ConflictReport {
                instructor: candidate.instructor_name.clone(),
                date: candidate.date.trim().to_string(),
                other_index: index,
                message: format!(
                    "{} already teaches {}-{} on {}",
                    candidate.instructor_name, other_interval.0, other_interval.1, other.date,
                ),
            });
        }
    }
    None
}
