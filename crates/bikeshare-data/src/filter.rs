//! Month and weekday narrowing of a loaded trip table.

use bikeshare_core::models::{FilterSelection, TripRecord, TripTable};
use chrono::Weekday;
use tracing::debug;

/// Keep the trips whose month is one of `months` (1-based ordinals) and whose
/// weekday is one of `weekdays`.
///
/// A single predicate is evaluated once per row, so the output keeps source
/// order and never repeats a row, whatever the selection lists contain.
pub fn filter_trips(table: &TripTable, months: &[u32], weekdays: &[Weekday]) -> TripTable {
    let records: Vec<TripRecord> = table
        .records
        .iter()
        .filter(|r| months.contains(&r.month) && weekdays.contains(&r.weekday))
        .cloned()
        .collect();

    debug!(
        before = table.len(),
        after = records.len(),
        "applied month/weekday filter"
    );

    table.with_records(records)
}

/// [`filter_trips`] using the months and weekdays of `selection`.
pub fn apply_selection(table: &TripTable, selection: &FilterSelection) -> TripTable {
    filter_trips(table, selection.months(), selection.weekdays())
}
