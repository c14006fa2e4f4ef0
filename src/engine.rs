//! Schedule engine: the checked mutation surface.
//!
//! Every mutation runs the same fixed sequence before returning:
//! validate → mutate → refresh derived state → notify. The engine owns the
//! entry store, the roster, and the global minutes-per-unit setting, and
//! keeps the derived views (workload totals, recap pivot) recomputed in
//! full after each accepted mutation. Rejected edits return early with an
//! [`EditError`] and leave everything untouched — no partial write, no
//! refresh, no change notification.
//!
//! The engine is single-threaded and synchronous; each entry point runs to
//! completion, including all cascading recomputation, before control
//! returns to the caller.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::aggregate::{self, RecapTable};
use crate::error::EditError;
use crate::models::{parse_date, ClockTime, EntryField, Roster, ScheduleEntry};
use crate::store::EntryStore;
use crate::validation;

/// Default lesson-period length in minutes.
pub const DEFAULT_UNIT_MINUTES: u32 = 45;

/// What changed, for presentation-layer refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Entries were inserted, removed, edited, or bulk-replaced.
    Entries,
    /// The roster's set of registered instructors changed.
    Roster,
    /// An instructor was renamed (entries and roster both rewritten).
    Rename,
    /// The global minutes-per-unit setting changed.
    UnitDuration,
}

/// One-way outward notifications. All methods default to no-ops; the
/// presentation layer overrides what it cares about. The engine never
/// queries an observer.
pub trait EngineObserver {
    /// A well-formed edit was rejected because it would double-book
    /// `instructor` on `date`.
    fn conflict_detected(&mut self, instructor: &str, date: &str, message: &str) {
        let _ = (instructor, date, message);
    }

    /// A field edit was rejected for a data-format reason.
    fn field_rejected(&mut self, field: EntryField, reason: &str) {
        let _ = (field, reason);
    }

    /// The store, roster, or configuration changed; derived views were
    /// refreshed and should be re-read.
    fn store_changed(&mut self, change: ChangeKind) {
        let _ = change;
    }
}

/// Schedule-integrity and aggregation engine.
///
/// Composes the entry store, the roster, and the derived views behind the
/// narrow interface the presentation layer calls.
pub struct ScheduleEngine {
    store: EntryStore,
    roster: Roster,
    unit_minutes: u32,
    totals: HashMap<String, u32>,
    recap: RecapTable,
    revision: u64,
    observer: Option<Box<dyn EngineObserver>>,
}

impl Default for ScheduleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScheduleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleEngine")
            .field("entries", &self.store.len())
            .field("roster", &self.roster.len())
            .field("unit_minutes", &self.unit_minutes)
            .field("revision", &self.revision)
            .finish()
    }
}

impl ScheduleEngine {
    /// Creates an empty engine with the default 45-minute unit.
    pub fn new() -> Self {
        Self {
            store: EntryStore::new(),
            roster: Roster::new(),
            unit_minutes: DEFAULT_UNIT_MINUTES,
            totals: HashMap::new(),
            recap: RecapTable::empty(),
            revision: 0,
            observer: None,
        }
    }

    /// Installs the outward notification sink, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn EngineObserver>) {
        self.observer = Some(observer);
    }

    // ----- reads -------------------------------------------------------

    /// All entries in order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        self.store.entries()
    }

    /// The entry at `pos`, if any.
    pub fn entry(&self, pos: usize) -> Option<&ScheduleEntry> {
        self.store.get(pos)
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Registered roster names in registration order.
    pub fn roster_names(&self) -> &[String] {
        self.roster.names()
    }

    /// Current minutes-per-unit setting.
    pub fn unit_minutes(&self) -> u32 {
        self.unit_minutes
    }

    /// Derived end time of the entry at `pos`, or `None` while the entry's
    /// start or duration is unparseable (rendered blank by callers).
    pub fn end_time(&self, pos: usize) -> Option<ClockTime> {
        self.store.get(pos)?.end_time(self.unit_minutes)
    }

    /// Current workload total for `name`. Unknown names read as zero.
    pub fn read_workload(&self, name: &str) -> u32 {
        self.totals.get(name).copied().unwrap_or(0)
    }

    /// The current recap pivot.
    pub fn read_recap(&self) -> &RecapTable {
        &self.recap
    }

    /// Monotonic count of accepted mutations. Lets a caller cheaply detect
    /// whether anything changed since it last looked.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ----- entry mutations ---------------------------------------------

    /// Inserts an empty entry at `pos` (clamped to the end). Returns the
    /// actual position.
    pub fn insert_entry(&mut self, pos: usize) -> usize {
        let pos = self.store.insert_empty(pos);
        debug!(pos, "entry inserted");
        self.committed(ChangeKind::Entries);
        pos
    }

    /// Removes the entry at `pos`.
    pub fn remove_entry(&mut self, pos: usize) -> Result<(), EditError> {
        match self.store.remove(pos) {
            Some(_) => {
                debug!(pos, "entry removed");
                self.committed(ChangeKind::Entries);
                Ok(())
            }
            None => Err(EditError::OutOfRange(pos)),
        }
    }

    /// Sets one field of one entry.
    ///
    /// Rejection order: position, value format, then the conflict scan
    /// (only for schedule-affecting fields, and only once the edited row
    /// is complete enough to occupy an interval). Label edits bypass the
    /// scan entirely. On any rejection the store is unchanged and no
    /// refresh fires.
    pub fn set_field(
        &mut self,
        pos: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        let value = value.into();
        let entry = self.store.get(pos).ok_or(EditError::OutOfRange(pos))?;

        if let Err(err) = check_field_format(field, &value) {
            warn!(pos, %field, %value, "field edit rejected: malformed");
            self.notify_rejection(&err);
            return Err(err);
        }

        if field.affects_schedule() {
            let mut candidate = entry.clone();
            candidate.set_field(field, value.clone());
            if let Some(report) =
                validation::would_conflict(self.store.entries(), Some(pos), &candidate, self.unit_minutes)
            {
                warn!(
                    pos,
                    instructor = %report.instructor,
                    date = %report.date,
                    "field edit rejected: schedule conflict"
                );
                let err = EditError::Conflict {
                    instructor: report.instructor,
                    date: report.date,
                    message: report.message,
                };
                self.notify_rejection(&err);
                return Err(err);
            }
        }

        self.store.set_field(pos, field, value);
        debug!(pos, %field, "field updated");
        self.committed(ChangeKind::Entries);
        Ok(())
    }

    /// Drops all entries and the whole roster (new document).
    pub fn clear(&mut self) {
        self.store.clear();
        self.roster = Roster::new();
        self.unit_minutes = DEFAULT_UNIT_MINUTES;
        debug!("document cleared");
        self.committed(ChangeKind::Entries);
    }

    // ----- roster mutations --------------------------------------------

    /// Registers a new instructor with zero assigned units.
    pub fn register_instructor(&mut self, name: impl Into<String>) -> Result<(), EditError> {
        self.roster.register(name).inspect_err(|err| {
            self.notify_rejection(err);
        })?;
        self.committed(ChangeKind::Roster);
        Ok(())
    }

    /// Unregisters an instructor. Their entries are untouched.
    pub fn remove_instructor(&mut self, name: &str) -> Result<(), EditError> {
        if !self.roster.remove(name) {
            return Err(EditError::UnknownInstructor(name.to_string()));
        }
        self.committed(ChangeKind::Roster);
        Ok(())
    }

    /// Renames an instructor, propagating the new name to every entry.
    ///
    /// `new` must not already identify a *different* instructor — neither a
    /// registered roster name nor a name observed in the store (exact,
    /// case-sensitive comparison). The rewrite completes before the single
    /// derived refresh runs, so aggregation only ever sees all-old or
    /// all-new. Renaming a name to itself is a no-op.
    pub fn rename_instructor(&mut self, old: &str, new: &str) -> Result<(), EditError> {
        if old == new {
            return Ok(());
        }
        if new.trim().is_empty() {
            let err = EditError::Malformed {
                field: EntryField::InstructorName,
                value: new.to_string(),
            };
            self.notify_rejection(&err);
            return Err(err);
        }
        if self.roster.contains(new) || self.store.observed_instructors().contains(&new) {
            warn!(old, new, "rename rejected: name already exists");
            let err = EditError::DuplicateName { name: new.to_string() };
            self.notify_rejection(&err);
            return Err(err);
        }

        let known = self.roster.rename(old, new);
        let rewritten = self.store.rename_instructor(old, new);
        if !known && rewritten == 0 {
            return Err(EditError::UnknownInstructor(old.to_string()));
        }

        debug!(old, new, rewritten, "instructor renamed");
        self.committed(ChangeKind::Rename);
        Ok(())
    }

    // ----- configuration -----------------------------------------------

    /// Changes the global lesson-period length. Every derived end time and
    /// both aggregate views reflect the new length on return.
    pub fn set_unit_duration(&mut self, minutes: i64) -> Result<(), EditError> {
        let minutes_u32 = match u32::try_from(minutes) {
            Ok(m) if m > 0 => m,
            // Non-positive or beyond u32: rejected rather than truncated
            _ => {
                let err = EditError::InvalidUnitDuration(minutes);
                self.notify_rejection(&err);
                return Err(err);
            }
        };
        self.unit_minutes = minutes_u32;
        debug!(minutes, "unit duration changed");
        self.committed(ChangeKind::UnitDuration);
        Ok(())
    }

    // ----- document boundary -------------------------------------------

    /// Replaces all state from loaded document parts. Rejects nothing:
    /// malformed rows are kept verbatim and surface later through normal
    /// edit validation; a non-positive unit duration falls back to the
    /// default.
    pub(crate) fn load_parts(
        &mut self,
        unit_minutes: i64,
        entries: Vec<ScheduleEntry>,
        roster_names: Vec<String>,
    ) {
        // Loading rejects nothing: out-of-range unit durations (non-positive
        // or beyond u32) fall back to the default instead of truncating
        self.unit_minutes = u32::try_from(unit_minutes)
            .ok()
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_UNIT_MINUTES);
        self.store.replace_all(entries);
        self.roster = Roster::new();
        for name in roster_names {
            // Blank and duplicate names in a loaded document are dropped silently
            let _ = self.roster.register(name);
        }
        debug!(
            entries = self.store.len(),
            roster = self.roster.len(),
            "document loaded"
        );
        self.committed(ChangeKind::Entries);
    }

    // ----- internal ----------------------------------------------------

    /// Post-mutation bookkeeping: full aggregate recompute, revision bump,
    /// change notification. Runs exactly once per accepted mutation.
    fn committed(&mut self, change: ChangeKind) {
        self.totals = aggregate::workload_totals(self.store.entries());
        self.recap = aggregate::build_recap(self.store.entries());
        self.revision += 1;
        if let Some(observer) = self.observer.as_mut() {
            observer.store_changed(change);
        }
    }

    fn notify_rejection(&mut self, err: &EditError) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        match err {
            EditError::Conflict {
                instructor,
                date,
                message,
            } => observer.conflict_detected(instructor, date, message),
            EditError::Malformed { field, value } => {
                observer.field_rejected(*field, &format!("'{value}' is not valid"));
            }
            EditError::DuplicateName { name } => {
                observer.field_rejected(
                    EntryField::InstructorName,
                    &format!("'{name}' already exists"),
                );
            }
            _ => {}
        }
    }
}

/// Edit-boundary format check for a prospective field value.
///
/// Empty text always passes: clearing a field is how a row returns to the
/// incomplete state. Label fields accept anything.
fn check_field_format(field: EntryField, value: &str) -> Result<(), EditError> {
    let malformed = || EditError::Malformed {
        field,
        value: value.to_string(),
    };
    if value.trim().is_empty() {
        return Ok(());
    }
    match field {
        EntryField::Date => parse_date(value).map(|_| ()).ok_or_else(malformed),
        EntryField::StartTime => ClockTime::parse(value).map(|_| ()).ok_or_else(malformed),
        EntryField::DurationUnits => crate::models::parse_units(value)
            .map(|_| ())
            .ok_or_else(malformed),
        EntryField::TrainingLabel | EntryField::AgendaLabel | EntryField::InstructorName => Ok(()),
    }
}
