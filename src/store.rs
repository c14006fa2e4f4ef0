//! Entry store.
//!
//! Owns the mutable, ordered collection of schedule entries. Pure data:
//! no validation, no derived computation, no notifications. The engine is
//! the checked mutation path and decides what may reach these methods;
//! keeping the store dumb is what makes "rejected edit leaves the store
//! byte-for-byte unchanged" trivially true.

use serde::{Deserialize, Serialize};

use crate::models::{EntryField, ScheduleEntry};

/// Ordered collection of schedule entries.
///
/// Entries are addressed by position, matching how a row-oriented editor
/// addresses them. Positions shift on insert/remove exactly like `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStore {
    entries: Vec<ScheduleEntry>,
}

impl EntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// The entry at `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<&ScheduleEntry> {
        self.entries.get(pos)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an empty entry at `pos` (clamped to the end).
    pub(crate) fn insert_empty(&mut self, pos: usize) -> usize {
        let pos = pos.min(self.entries.len());
        self.entries.insert(pos, ScheduleEntry::empty());
        pos
    }

    /// Removes and returns the entry at `pos`.
    pub(crate) fn remove(&mut self, pos: usize) -> Option<ScheduleEntry> {
        if pos < self.entries.len() {
            Some(self.entries.remove(pos))
        } else {
            None
        }
    }

    /// Drops every entry.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the whole collection (document load).
    pub(crate) fn replace_all(&mut self, entries: Vec<ScheduleEntry>) {
        self.entries = entries;
    }

    /// Overwrites one field of one entry. Caller has already validated.
    pub(crate) fn set_field(&mut self, pos: usize, field: EntryField, value: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(pos) {
            entry.set_field(field, value);
        }
    }

    /// Rewrites every entry referencing `old` to reference `new`.
    ///
    /// Returns how many entries changed. The rewrite is a single pass with
    /// no intermediate observable state, so downstream derivations see
    /// all-old or all-new, never a partial mix.
    pub(crate) fn rename_instructor(&mut self, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            if entry.instructor_name == old {
                entry.instructor_name = new.to_string();
                changed += 1;
            }
        }
        changed
    }

    /// Distinct instructor names observed across entries, in first-seen order.
    /// Blank names are skipped.
    pub fn observed_instructors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            let name = entry.instructor_name.as_str();
            if !name.trim().is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}
