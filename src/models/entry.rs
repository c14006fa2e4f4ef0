//! Schedule entry model.
//!
//! One entry is one teaching assignment: who teaches which agenda item of
//! which training, on which date, starting when, for how many lesson-period
//! units (JP). All six fields are stored as raw text — rows are created
//! empty and filled in one field at a time, so an entry is allowed to be
//! incomplete or unparseable at any moment. Derivations (end time, conflict
//! scan, aggregation) each decide for themselves which rows qualify.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::clock::{self, ClockTime};

/// One teaching assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Session date, `DD-MM-YYYY`.
    pub date: String,
    /// Session start, `HH:MM` 24-hour.
    pub start_time: String,
    /// Lesson-period unit count (non-negative integer).
    pub duration_units: String,
    /// Training/curriculum item the session belongs to.
    pub training_label: String,
    /// Syllabus topic covered.
    pub agenda_label: String,
    /// Instructor identity, matched by exact string across the roster.
    pub instructor_name: String,
}

impl ScheduleEntry {
    /// Creates an empty entry (all fields blank).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the start time.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start_time = start.into();
        self
    }

    /// Sets the unit count.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.duration_units = units.into();
        self
    }

    /// Sets the training label.
    pub fn with_training(mut self, training: impl Into<String>) -> Self {
        self.training_label = training.into();
        self
    }

    /// Sets the agenda label.
    pub fn with_agenda(mut self, agenda: impl Into<String>) -> Self {
        self.agenda_label = agenda.into();
        self
    }

    /// Sets the instructor name.
    pub fn with_instructor(mut self, name: impl Into<String>) -> Self {
        self.instructor_name = name.into();
        self
    }

    /// Raw text of one field.
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Date => &self.date,
            EntryField::StartTime => &self.start_time,
            EntryField::DurationUnits => &self.duration_units,
            EntryField::TrainingLabel => &self.training_label,
            EntryField::AgendaLabel => &self.agenda_label,
            EntryField::InstructorName => &self.instructor_name,
        }
    }

    /// Overwrites one field with raw text. No validation; the engine is the
    /// checked mutation path.
    pub(crate) fn set_field(&mut self, field: EntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EntryField::Date => self.date = value,
            EntryField::StartTime => self.start_time = value,
            EntryField::DurationUnits => self.duration_units = value,
            EntryField::TrainingLabel => self.training_label = value,
            EntryField::AgendaLabel => self.agenda_label = value,
            EntryField::InstructorName => self.instructor_name = value,
        }
    }

    /// The date, if it parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        clock::parse_date(&self.date)
    }

    /// The start time, if it parses.
    pub fn parsed_start(&self) -> Option<ClockTime> {
        ClockTime::parse(&self.start_time)
    }

    /// The unit count, if it parses as a non-negative integer.
    pub fn parsed_units(&self) -> Option<u32> {
        clock::parse_units(&self.duration_units)
    }

    /// Derived session end, or `None` while start or duration is unparseable.
    pub fn end_time(&self, unit_minutes: u32) -> Option<ClockTime> {
        let start = self.parsed_start()?;
        let units = self.parsed_units()?;
        Some(clock::derive_end_time(start, units, unit_minutes))
    }

    /// The occupied `[start, end)` interval, when derivable.
    pub fn interval(&self, unit_minutes: u32) -> Option<(ClockTime, ClockTime)> {
        let start = self.parsed_start()?;
        Some((start, self.end_time(unit_minutes)?))
    }

    /// Whether the entry carries everything the conflict scan needs:
    /// a named instructor plus parseable date, start, and duration.
    pub fn is_schedulable(&self) -> bool {
        !self.instructor_name.trim().is_empty()
            && self.parsed_date().is_some()
            && self.parsed_start().is_some()
            && self.parsed_units().is_some()
    }

    /// Whether the entry contributes a recap cell: parseable date plus
    /// non-empty agenda and training labels. Time and duration do not gate
    /// recap membership.
    pub fn qualifies_for_recap(&self) -> bool {
        self.parsed_date().is_some()
            && !self.agenda_label.trim().is_empty()
            && !self.training_label.trim().is_empty()
    }
}

/// Addressable fields of a [`ScheduleEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Date,
    StartTime,
    DurationUnits,
    TrainingLabel,
    AgendaLabel,
    InstructorName,
}

impl EntryField {
    /// Fields in document column order.
    pub const ALL: [EntryField; 6] = [
        EntryField::Date,
        EntryField::StartTime,
        EntryField::DurationUnits,
        EntryField::TrainingLabel,
        EntryField::AgendaLabel,
        EntryField::InstructorName,
    ];

    /// Whether an edit to this field must pass the conflict scan.
    /// Label edits bypass it entirely.
    pub fn affects_schedule(self) -> bool {
        matches!(
            self,
            EntryField::Date
                | EntryField::StartTime
                | EntryField::DurationUnits
                | EntryField::InstructorName
        )
    }

    /// Stable lowercase name, used in messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            EntryField::Date => "date",
            EntryField::StartTime => "start_time",
            EntryField::DurationUnits => "duration_units",
            EntryField::TrainingLabel => "training_label",
            EntryField::AgendaLabel => "agenda_label",
            EntryField::InstructorName => "instructor_name",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
