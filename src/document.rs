//! Persisted document boundary.
//!
//! The surrounding editor saves and loads one JSON document:
//!
//! ```json
//! {
//!   "jp_duration": 45,
//!   "models": {
//!     "Input": [["19-10-2026", "14:00", 3, "Pendidikan Pancasila", "P1", "Yeli"]],
//!     "WI":    [["Yeli", 3]],
//!     "Rekap": [["Tgl", "Yeli"], ["19-10-2026", "P1 - Pendidikan Pancasila"]]
//!   }
//! }
//! ```
//!
//! Loading rejects nothing: cells of any JSON type are coerced to text,
//! short rows are padded, extra cells dropped, and malformed values are
//! kept verbatim so they surface through normal edit validation once the
//! user touches them. Saving recomputes the `WI` totals and `Rekap` pivot
//! from the current entries, never from what was loaded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{ScheduleEngine, DEFAULT_UNIT_MINUTES};
use crate::models::{EntryField, ScheduleEntry};

/// The on-disk document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Minutes per lesson-period unit.
    #[serde(default = "default_jp_duration")]
    pub jp_duration: i64,
    /// The three persisted tables.
    #[serde(default)]
    pub models: DocumentModels,
}

/// Row-major table payloads, keyed by their historical table names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentModels {
    /// Raw entry rows: `[date, start, units, training, agenda, instructor]`.
    #[serde(rename = "Input", default)]
    pub input: Vec<Vec<Value>>,
    /// Roster rows: `[name, total_units]`. Totals are derived; only the
    /// names matter on load.
    #[serde(rename = "WI", default)]
    pub wi: Vec<Vec<Value>>,
    /// Recap pivot, header row first. Purely derived; ignored on load.
    #[serde(rename = "Rekap", default)]
    pub rekap: Vec<Vec<Value>>,
}

fn default_jp_duration() -> i64 {
    DEFAULT_UNIT_MINUTES as i64
}

/// Renders a JSON cell as entry text. Strings pass through; numbers and
/// booleans use their display form; null and structured values go blank.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn entry_from_row(row: &[Value]) -> ScheduleEntry {
    let mut entry = ScheduleEntry::empty();
    for (field, cell) in EntryField::ALL.iter().zip(row) {
        entry.set_field(*field, cell_text(cell));
    }
    entry
}

fn entry_to_row(entry: &ScheduleEntry) -> Vec<Value> {
    EntryField::ALL
        .iter()
        .map(|field| {
            let text = entry.field(*field);
            // Durations persist as numbers when they parse, mirroring how
            // the editor's numeric column writes them
            if *field == EntryField::DurationUnits {
                if let Some(units) = entry.parsed_units() {
                    return Value::from(units);
                }
            }
            Value::from(text)
        })
        .collect()
}

impl Document {
    /// Builds an engine from this document.
    pub fn into_engine(self) -> ScheduleEngine {
        let mut engine = ScheduleEngine::new();
        self.apply_to(&mut engine);
        engine
    }

    /// Loads this document into an existing engine, replacing its state.
    pub fn apply_to(&self, engine: &mut ScheduleEngine) {
        let entries = self.models.input.iter().map(|r| entry_from_row(r)).collect();
        let roster = self
            .models
            .wi
            .iter()
            .filter_map(|row| row.first())
            .map(cell_text)
            .collect();
        engine.load_parts(self.jp_duration, entries, roster);
    }

    /// Snapshots an engine into document form.
    pub fn from_engine(engine: &ScheduleEngine) -> Self {
        let input = engine.entries().iter().map(entry_to_row).collect();
        let wi = engine
            .roster_names()
            .iter()
            .map(|name| vec![Value::from(name.as_str()), Value::from(engine.read_workload(name))])
            .collect();
        let recap = engine.read_recap();
        let text_row = |row: &[String]| row.iter().map(|c| Value::from(c.as_str())).collect();
        let mut rekap: Vec<Vec<Value>> = Vec::with_capacity(recap.rows.len() + 1);
        rekap.push(text_row(&recap.header));
        rekap.extend(recap.rows.iter().map(|r| text_row(r)));

        Self {
            jp_duration: engine.unit_minutes() as i64,
            models: DocumentModels { input, wi, rekap },
        }
    }
}
