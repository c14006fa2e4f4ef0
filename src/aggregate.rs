//! Derived views over the entry store.
//!
//! Two independent pure derivations:
//!
//! - **Workload totals**: summed lesson-period units per instructor.
//! - **Recap pivot**: a date × instructor cross-tabulation of covered topics.
//!
//! Both are recomputed wholesale from the current entries — date and
//! instructor set membership can change non-locally on any edit, so there
//! is no incremental patching and therefore no staleness to reason about.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::ScheduleEntry;

/// Cell text for a `(date, instructor)` pair with no qualifying sessions.
pub const EMPTY_CELL: &str = "-";

/// Header label of the recap's date column.
pub const DATE_COLUMN: &str = "Tgl";

/// Sums the unit counts of `name`'s entries.
///
/// Only parseable non-negative durations contribute; malformed or blank
/// durations count as zero. Name comparison is exact.
pub fn total_units(entries: &[ScheduleEntry], name: &str) -> u32 {
    entries
        .iter()
        .filter(|e| e.instructor_name == name)
        .filter_map(|e| e.parsed_units())
        .sum()
}

/// Computes workload totals for every instructor observed in `entries`.
///
/// Instructors with no parseable durations still appear, with total zero.
pub fn workload_totals(entries: &[ScheduleEntry]) -> HashMap<String, u32> {
    let mut totals: HashMap<String, u32> = HashMap::new();
    for entry in entries {
        if entry.instructor_name.trim().is_empty() {
            continue;
        }
        let slot = totals.entry(entry.instructor_name.clone()).or_insert(0);
        if let Some(units) = entry.parsed_units() {
            *slot += units;
        }
    }
    totals
}

/// The date × instructor recap pivot.
///
/// `header` is `["Tgl", ...instructor names]` with names sorted
/// lexicographically. Each row starts with the date (ascending) followed by
/// one cell per instructor: the covered topics as `"{agenda} - {training}"`
/// lines, or [`EMPTY_CELL`] when that instructor taught nothing that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapTable {
    /// Column labels: date column first, then sorted instructor names.
    pub header: Vec<String>,
    /// Row-major cells, one row per distinct qualifying date.
    pub rows: Vec<Vec<String>>,
}

impl RecapTable {
    /// An empty pivot (no qualifying entries).
    pub fn empty() -> Self {
        Self {
            header: vec![DATE_COLUMN.to_string()],
            rows: Vec::new(),
        }
    }

    /// Number of data rows (distinct qualifying dates).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns including the date column.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Cell text for a date string and instructor name, if both exist.
    /// Only instructor columns are searched, so a name equal to the date
    /// column's label never resolves to the date column.
    pub fn cell(&self, date: &str, instructor: &str) -> Option<&str> {
        let col = self
            .header
            .iter()
            .skip(1)
            .position(|h| h == instructor)
            .map(|i| i + 1)?;
        let row = self.rows.iter().find(|r| r.first().map(String::as_str) == Some(date))?;
        row.get(col).map(String::as_str)
    }
}

/// Builds the recap pivot from the current entries.
///
/// A row qualifies when its date parses, both labels are non-empty, and it
/// names an instructor (a column cannot hang off a blank name);
/// malformed time or duration fields do not exclude it. Within one
/// `(date, instructor)` cell, topics keep store order (the date sort is
/// stable), matching the order the sessions were entered.
pub fn build_recap(entries: &[ScheduleEntry]) -> RecapTable {
    // (date, name) → accumulated cell lines, ordered by parsed date via BTreeMap
    let mut cells: BTreeMap<(NaiveDate, &str), Vec<String>> = BTreeMap::new();
    let mut names: Vec<&str> = Vec::new();

    for entry in entries {
        if !entry.qualifies_for_recap() || entry.instructor_name.trim().is_empty() {
            continue;
        }
        let date = match entry.parsed_date() {
            Some(d) => d,
            None => continue,
        };
        let name = entry.instructor_name.as_str();
        if !names.contains(&name) {
            names.push(name);
        }
        cells
            .entry((date, name))
            .or_default()
            .push(format!("{} - {}", entry.agenda_label, entry.training_label));
    }

    if cells.is_empty() {
        return RecapTable::empty();
    }

    names.sort_unstable();

    let mut dates: Vec<NaiveDate> = cells.keys().map(|(d, _)| *d).collect();
    dates.dedup();

    let mut header = Vec::with_capacity(names.len() + 1);
    header.push(DATE_COLUMN.to_string());
    header.extend(names.iter().map(|n| n.to_string()));

    let rows = dates
        .iter()
        .map(|date| {
            let mut row = Vec::with_capacity(names.len() + 1);
            row.push(date.format(crate::models::DATE_FORMAT).to_string());
            for name in &names {
                row.push(match cells.get(&(*date, *name)) {
                    Some(lines) => lines.join("\n"),
                    None => EMPTY_CELL.to_string(),
                });
            }
            row
        })
        .collect();

    RecapTable { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, agenda: &str, training: &str, name: &str, units: &str) -> ScheduleEntry {
        ScheduleEntry::empty()
            .with_date(date)
            .with_agenda(agenda)
            .with_training(training)
            .with_instructor(name)
            .with_units(units)
    }

    #[test]
    fn test_total_units_sums_well_formed() {
        let entries = vec![
            entry("19-10-2026", "P1", "T1", "Yeli", "3"),
            entry("20-10-2026", "P2", "T1", "Yeli", "2"),
            entry("20-10-2026", "P2", "T1", "Busur", "5"),
            entry("21-10-2026", "P3", "T1", "Yeli", "bad"), // contributes zero
            entry("22-10-2026", "P4", "T1", "Yeli", ""),    // contributes zero
        ];
        assert_eq!(total_units(&entries, "Yeli"), 5);
        assert_eq!(total_units(&entries, "Busur"), 5);
        assert_eq!(total_units(&entries, "Nobody"), 0);
    }

    #[test]
    fn test_workload_totals_map() {
        let entries = vec![
            entry("19-10-2026", "P1", "T1", "Yeli", "3"),
            entry("", "", "", "Busur", "oops"),
            entry("", "", "", "", "4"), // blank name ignored
        ];
        let totals = workload_totals(&entries);
        assert_eq!(totals.get("Yeli"), Some(&3));
        assert_eq!(totals.get("Busur"), Some(&0)); // observed, malformed units
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_recap_two_instructors_two_dates() {
        let entries = vec![
            entry("20-10-2026", "P2", "Pendidikan Kewarganegaraan", "Yeli", "3"),
            entry("15-10-2026", "P1", "Pendidikan Pancasila", "Busur", "2"),
        ];
        let recap = build_recap(&entries);
        assert_eq!(recap.header, vec!["Tgl", "Busur", "Yeli"]);
        assert_eq!(recap.row_count(), 2);
        assert_eq!(recap.column_count(), 3);
        // Dates ascending
        assert_eq!(recap.rows[0][0], "15-10-2026");
        assert_eq!(recap.rows[1][0], "20-10-2026");
        // One real cell per row, "-" elsewhere
        assert_eq!(recap.rows[0][1], "P1 - Pendidikan Pancasila");
        assert_eq!(recap.rows[0][2], "-");
        assert_eq!(recap.rows[1][1], "-");
        assert_eq!(recap.rows[1][2], "P2 - Pendidikan Kewarganegaraan");
    }

    #[test]
    fn test_recap_multi_session_cell_keeps_entry_order() {
        let entries = vec![
            entry("19-10-2026", "P2", "T", "Yeli", "1"),
            entry("19-10-2026", "P1", "T", "Yeli", "1"),
        ];
        let recap = build_recap(&entries);
        assert_eq!(recap.rows[0][1], "P2 - T\nP1 - T");
    }

    #[test]
    fn test_recap_excludes_unqualified_rows() {
        let entries = vec![
            entry("19-10-2026", "P1", "T", "Yeli", "1"),
            entry("", "P2", "T", "Yeli", "1"),          // no date
            entry("31-02-2026", "P3", "T", "Yeli", "1"), // unparseable date
            entry("19-10-2026", "", "T", "Yeli", "1"),   // no agenda
            entry("19-10-2026", "P4", "", "Yeli", "1"),  // no training
        ];
        let recap = build_recap(&entries);
        assert_eq!(recap.row_count(), 1);
        assert_eq!(recap.rows[0][1], "P1 - T");
    }

    #[test]
    fn test_recap_skips_blank_instructor() {
        // A fresh row often gets its date and labels before its instructor;
        // that half-filled state must not grow a nameless column
        let entries = vec![
            entry("19-10-2026", "P1", "T", "", "1"),
            entry("19-10-2026", "P2", "T", "  ", "1"),
            entry("19-10-2026", "P3", "T", "Yeli", "1"),
        ];
        let recap = build_recap(&entries);
        assert_eq!(recap.header, vec!["Tgl", "Yeli"]);
        assert!(recap.header.iter().all(|h| !h.trim().is_empty()));
        assert_eq!(recap.rows[0][1], "P3 - T");
    }

    #[test]
    fn test_recap_blank_instructor_only_yields_empty_pivot() {
        let entries = vec![entry("19-10-2026", "P1", "T", "", "1")];
        let recap = build_recap(&entries);
        assert_eq!(recap.header, vec!["Tgl"]);
        assert_eq!(recap.row_count(), 0);
    }

    #[test]
    fn test_recap_malformed_duration_still_included() {
        let entries = vec![entry("19-10-2026", "P1", "T", "Yeli", "not a number")];
        let recap = build_recap(&entries);
        assert_eq!(recap.row_count(), 1);
        assert_eq!(recap.rows[0][1], "P1 - T");
    }

    #[test]
    fn test_recap_date_sort_is_chronological_not_lexical() {
        // Lexically "02-01-2027" < "30-12-2026", chronologically the reverse
        let entries = vec![
            entry("02-01-2027", "P2", "T", "Yeli", "1"),
            entry("30-12-2026", "P1", "T", "Yeli", "1"),
        ];
        let recap = build_recap(&entries);
        assert_eq!(recap.rows[0][0], "30-12-2026");
        assert_eq!(recap.rows[1][0], "02-01-2027");
    }

    #[test]
    fn test_recap_empty() {
        let recap = build_recap(&[]);
        assert_eq!(recap.header, vec!["Tgl"]);
        assert_eq!(recap.row_count(), 0);
    }

    #[test]
    fn test_recap_deterministic() {
        let entries = vec![
            entry("19-10-2026", "P1", "T", "Yeli", "1"),
            entry("15-10-2026", "P2", "T", "Busur", "2"),
            entry("19-10-2026", "P3", "T", "Busur", "1"),
        ];
        assert_eq!(build_recap(&entries), build_recap(&entries));
    }

    #[test]
    fn test_recap_cell_lookup() {
        let entries = vec![entry("19-10-2026", "P1", "T", "Yeli", "1")];
        let recap = build_recap(&entries);
        assert_eq!(recap.cell("19-10-2026", "Yeli"), Some("P1 - T"));
        assert_eq!(recap.cell("19-10-2026", "Busur"), None);
        assert_eq!(recap.cell("20-10-2026", "Yeli"), None);
    }

    #[test]
    fn test_recap_cell_for_instructor_named_like_date_column() {
        let entries = vec![entry("19-10-2026", "P1", "T", "Tgl", "1")];
        let recap = build_recap(&entries);
        assert_eq!(recap.header, vec!["Tgl", "Tgl"]);
        // Lookup must hit the instructor column, not the date column
        assert_eq!(recap.cell("19-10-2026", "Tgl"), Some("P1 - T"));
    }
}
