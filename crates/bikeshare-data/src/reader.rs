//! City source loading for the bikeshare explorer.
//!
//! Reads the per-city CSV files named by the registry, converts each row into
//! a [`TripRecord`] and concatenates the selected cities into one
//! [`TripTable`].

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{TripRecord, TripTable};
use bikeshare_core::registry::{City, Column};
use bikeshare_core::settings::source_path;
use bikeshare_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Rows and columns read from a single source file.
#[derive(Debug, Clone)]
pub struct SourceData {
    /// Known columns present in the file header, canonical order.
    pub columns: Vec<Column>,
    pub records: Vec<TripRecord>,
}

/// Load and concatenate `cities` from `data_dir`, in the given order.
///
/// The resulting column list is the union of every source's columns in
/// canonical order; rows from a source lacking an optional column carry
/// `None` for it. Any unreadable source fails the whole load.
pub fn load_cities(data_dir: &Path, cities: &[City]) -> Result<TripTable> {
    let mut columns: BTreeSet<Column> = BTreeSet::new();
    let mut records: Vec<TripRecord> = Vec::new();

    for &city in cities {
        let source = read_source(&source_path(data_dir, city))?;
        debug!(
            city = city.key(),
            rows = source.records.len(),
            "loaded city source"
        );
        columns.extend(source.columns);
        records.extend(source.records);
    }

    debug!(
        cities = cities.len(),
        rows = records.len(),
        "concatenated city sources"
    );

    Ok(TripTable {
        cities: cities.to_vec(),
        columns: columns.into_iter().collect(),
        records,
    })
}

/// Read one CSV source file from disk.
pub fn read_source(path: &Path) -> Result<SourceData> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(file, path)
}

/// Read trip rows from any CSV stream; `path` is only used in errors.
pub fn read_trips<R: Read>(input: R, path: &Path) -> Result<SourceData> {
    let csv_err = |source: csv::Error| BikeshareError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let (columns, index_pos) = resolve_columns(&headers, path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        let raw: RawTrip = row.deserialize(Some(&headers)).map_err(csv_err)?;
        let index = index_pos
            .and_then(|pos| row.get(pos))
            .and_then(|cell| cell.parse::<u64>().ok());
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(raw.into_record(index, path, line)?);
    }

    Ok(SourceData { columns, records })
}

/// Source files from the registry that do not exist under `data_dir`.
pub fn find_missing_sources(data_dir: &Path) -> Vec<PathBuf> {
    City::ALL
        .iter()
        .map(|city| source_path(data_dir, *city))
        .filter(|path| !path.is_file())
        .collect()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Raw CSV row; header names are matched by serde.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_record(self, index: Option<u64>, path: &Path, line: u64) -> Result<TripRecord> {
        let start_time = parse_timestamp(&self.start_time)
            .map_err(|_| timestamp_error(&self.start_time, path, line))?;
        let end_time = parse_timestamp(&self.end_time)
            .map_err(|_| timestamp_error(&self.end_time, path, line))?;

        Ok(TripRecord::new(
            index,
            start_time,
            end_time,
            self.trip_duration.max(0.0),
            self.start_station,
            self.end_station,
            self.user_type.filter(|v| !v.is_empty()),
            self.gender.filter(|v| !v.is_empty()),
            self.birth_year.map(|y| y.round() as i32),
        ))
    }
}

fn timestamp_error(raw: &str, path: &Path, line: u64) -> BikeshareError {
    BikeshareError::TimestampParse(format!("{:?} at {}:{}", raw, path.display(), line))
}

/// Map header cells to known columns and check the required ones.
///
/// Returns the known columns in canonical order and the position of the
/// unnamed index column, if any. Unknown headers are ignored.
fn resolve_columns(
    headers: &csv::StringRecord,
    path: &Path,
) -> Result<(Vec<Column>, Option<usize>)> {
    let mut columns: BTreeSet<Column> = BTreeSet::new();
    let mut index_pos = None;

    for (pos, header) in headers.iter().enumerate() {
        match Column::from_header(header) {
            Some(Column::Index) => {
                index_pos.get_or_insert(pos);
                columns.insert(Column::Index);
            }
            Some(column) => {
                columns.insert(column);
            }
            None => warn!(header, path = %path.display(), "ignoring unknown column"),
        }
    }

    if let Some(missing) = Column::REQUIRED.iter().find(|c| !columns.contains(c)) {
        return Err(BikeshareError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.header().to_string(),
        });
    }

    Ok((columns.into_iter().collect(), index_pos))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
