//! Instructor roster.
//!
//! The roster is the identity authority: instructor names are unique within
//! it (case-sensitive exact match), and a rename is the only mutation path
//! for a name that is meant to stay "the same instructor". Workload totals
//! are never stored here — they are recomputed from the entry store by the
//! aggregator on every change.
//!
//! Registration order is preserved because it is the order the roster table
//! displays and persists in; the recap pivot sorts names independently.

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Registered instructor names, unique, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is registered (exact match).
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of registered instructors.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registers a new instructor.
    ///
    /// Rejects blank names as malformed and existing names as duplicates.
    /// An instructor may be registered before any entry references them
    /// (zero assigned units is a valid state).
    pub fn register(&mut self, name: impl Into<String>) -> Result<(), EditError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EditError::Malformed {
                field: crate::models::EntryField::InstructorName,
                value: name,
            });
        }
        if self.contains(&name) {
            return Err(EditError::DuplicateName { name });
        }
        self.names.push(name);
        Ok(())
    }

    /// Removes an instructor. Returns whether the name was present.
    /// Entries referencing the name are left alone; they simply stop
    /// appearing in the roster view.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Replaces `old` with `new` in place, keeping registration order.
    ///
    /// Uniqueness against the entry store is the engine's concern; this
    /// only guards the roster's own rows. Returns whether `old` was found.
    pub(crate) fn rename(&mut self, old: &str, new: &str) -> bool {
        match self.names.iter_mut().find(|n| *n == old) {
            Some(slot) => {
                *slot = new.to_string();
                true
            }
            None => false,
        }
    }
}
