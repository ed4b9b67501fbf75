//! Load-and-filter pipeline for the bikeshare explorer.
//!
//! Reads the selected city sources, narrows them to the selected months and
//! weekdays, and returns an [`AnalysisResult`] ready for the statistics and
//! raw-data views.

use std::path::Path;
use std::time::Instant;

use bikeshare_core::error::Result;
use bikeshare_core::models::{FilterSelection, TripTable};

use crate::filter::apply_selection;
use crate::reader::load_cities;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisMetadata {
    /// Rows read from all selected sources before filtering.
    pub rows_loaded: usize,
    /// Rows left after the month/weekday filter.
    pub rows_matched: usize,
    /// Wall-clock seconds spent reading and filtering.
    pub load_time_seconds: f64,
}

/// The complete output of [`load_selection`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Trips matching the selection, in source order.
    pub table: TripTable,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline.
///
/// 1. Load and concatenate the selected cities from `data_dir`.
/// 2. Keep rows in the selected months and weekdays.
/// 3. Return the filtered table with counts and timing.
///
/// A missing or unreadable source fails the whole call; no partial table is
/// returned.
pub fn load_selection(data_dir: &Path, selection: &FilterSelection) -> Result<AnalysisResult> {
    let started = Instant::now();

    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let unified = load_cities(data_dir, selection.cities())?;
    let rows_loaded = unified.len();

    // ── Step 2: Filter ────────────────────────────────────────────────────────
    let table = apply_selection(&unified, selection);

    // ── Step 3: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        rows_loaded,
        rows_matched: table.len(),
        load_time_seconds: started.elapsed().as_secs_f64(),
    };

    tracing::info!(
        rows_loaded,
        rows_matched = metadata.rows_matched,
        "selection loaded"
    );

    Ok(AnalysisResult { table, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_city, CHICAGO_CSV, NYC_CSV, WASHINGTON_CSV};
    use bikeshare_core::error::BikeshareError;
    use bikeshare_core::registry::{City, Column, MONTHS, WEEKDAYS};
    use tempfile::TempDir;

    fn data_dir() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        write_city(tmp.path(), City::Chicago, CHICAGO_CSV);
        write_city(tmp.path(), City::NewYorkCity, NYC_CSV);
        write_city(tmp.path(), City::Washington, WASHINGTON_CSV);
        tmp
    }

    #[test]
    fn test_all_months_and_weekdays_keeps_everything() {
        let tmp = data_dir();
        let sel = FilterSelection::from_names(
            &["chicago", "new york city", "washington"],
            &MONTHS,
            &WEEKDAYS,
        )
        .unwrap();

        let result = load_selection(tmp.path(), &sel).unwrap();
        assert_eq!(result.metadata.rows_loaded, 10);
        assert_eq!(result.metadata.rows_matched, 10);
        assert_eq!(result.table.columns, Column::CANONICAL.to_vec());
    }

    #[test]
    fn test_month_and_weekday_narrowing() {
        let tmp = data_dir();
        let sel = FilterSelection::from_names(
            &["chicago", "washington"],
            &["june", "march"],
            &["wednesday", "monday"],
        )
        .unwrap();

        let result = load_selection(tmp.path(), &sel).unwrap();
        // Chicago: Mar 6 (Mon). Washington: Jun 21 (Wed).
        let indexes: Vec<Option<u64>> = result.table.records.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![Some(304487), Some(1621326)]);
        assert_eq!(result.metadata.rows_loaded, 7);
    }

    #[test]
    fn test_empty_result() {
        let tmp = data_dir();
        let sel = FilterSelection::from_names(&["washington"], &["january"], &["sunday"]).unwrap();

        let result = load_selection(tmp.path(), &sel).unwrap();
        assert!(result.table.is_empty());
        assert_eq!(result.metadata.rows_matched, 0);
    }

    #[test]
    fn test_missing_source_fails() {
        let tmp = TempDir::new().expect("tempdir");
        let sel = FilterSelection::from_names(&["chicago"], &["may"], &["monday"]).unwrap();
        assert!(matches!(
            load_selection(tmp.path(), &sel),
            Err(BikeshareError::FileRead { .. })
        ));
    }
}
