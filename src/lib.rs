//! Schedule-integrity and aggregation engine for instructor teaching
//! assignments.
//!
//! Tracks who teaches which session, on which date, at which time, for how
//! many lesson-period units (JP), and derives per-instructor workload
//! totals plus a date × instructor recap pivot. The surrounding editor and
//! its file handling live elsewhere; they drive this crate through
//! [`engine::ScheduleEngine`] and the [`document::Document`] boundary.
//!
//! # Modules
//!
//! - **`models`**: Raw domain types — `ScheduleEntry`, `Roster`,
//!   `ClockTime`, and the date/time/unit parsers
//! - **`store`**: The mutable entry collection (pure data)
//! - **`validation`**: Double-booking detection over half-open intervals
//! - **`aggregate`**: Workload totals and the recap pivot
//! - **`engine`**: The checked mutation surface — validate, mutate,
//!   refresh, notify — with rename propagation and outward notifications
//! - **`document`**: The persisted JSON document shape (tolerant load)
//! - **`error`**: The edit rejection taxonomy
//!
//! # Integrity rules
//!
//! - Sessions of one instructor on one day never overlap; intervals are
//!   half-open, so touching endpoints are allowed.
//! - Instructor names are roster-unique; renames propagate atomically to
//!   every entry.
//! - Workload totals and the recap are recomputed wholesale on every
//!   accepted mutation; they are never stale and never stored.
//! - Incomplete rows are legal and editable; each derivation decides which
//!   rows qualify.

pub mod aggregate;
pub mod document;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;

pub use aggregate::RecapTable;
pub use document::Document;
pub use engine::{ChangeKind, EngineObserver, ScheduleEngine, DEFAULT_UNIT_MINUTES};
pub use error::EditError;
pub use models::{ClockTime, EntryField, Roster, ScheduleEntry};
pub use store::EntryStore;
