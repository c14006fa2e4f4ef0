//! Edit rejection taxonomy.
//!
//! Every mutation entry point returns `Result<(), EditError>`. Rejections
//! leave the store untouched and are always recoverable: the caller
//! re-prompts the user and may retry with different values. Two classes
//! matter to callers and are kept as distinct variants:
//!
//! - data-format problems (`Malformed`, `DuplicateName`) — the value itself
//!   is unusable;
//! - business-rule violations (`Conflict`) — the value is well-formed but
//!   would double-book an instructor.

use thiserror::Error;

use crate::models::EntryField;

/// Why an edit was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The value does not parse for its field (bad date, time, or unit count).
    #[error("{field} value '{value}' is not valid")]
    Malformed {
        /// Field being edited.
        field: EntryField,
        /// The offending raw text.
        value: String,
    },

    /// A roster identity edit collided with another existing instructor.
    #[error("instructor '{name}' already exists")]
    DuplicateName {
        /// The name that is already taken.
        name: String,
    },

    /// The edit would overlap another session of the same instructor
    /// on the same day.
    #[error("schedule conflict for {instructor} on {date}: {message}")]
    Conflict {
        /// Instructor being double-booked.
        instructor: String,
        /// Day of the collision, `DD-MM-YYYY`.
        date: String,
        /// Human-readable description of the colliding session.
        message: String,
    },

    /// Entry position outside the store.
    #[error("entry index {0} is out of range")]
    OutOfRange(usize),

    /// The global minutes-per-unit setting must be positive.
    #[error("unit duration must be positive, got {0}")]
    InvalidUnitDuration(i64),

    /// A rename referenced an instructor nobody knows.
    #[error("unknown instructor '{0}'")]
    UnknownInstructor(String),
}

impl EditError {
    /// Whether this rejection is a scheduling conflict (business rule) as
    /// opposed to a data-format problem.
    pub fn is_conflict(&self) -> bool {
        matches!(self, EditError::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = EditError::Malformed {
            field: EntryField::Date,
            value: "19/10/2026".into(),
        };
        assert_eq!(e.to_string(), "date value '19/10/2026' is not valid");

        let e = EditError::DuplicateName { name: "Yeli".into() };
        assert_eq!(e.to_string(), "instructor 'Yeli' already exists");
    }

    #[test]
    fn test_conflict_classification() {
        let conflict = EditError::Conflict {
            instructor: "Yeli".into(),
            date: "19-10-2026".into(),
            message: "overlaps 14:00-16:15".into(),
        };
        assert!(conflict.is_conflict());
        assert!(!EditError::OutOfRange(3).is_conflict());
    }
}
