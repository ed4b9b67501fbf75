//! Five-row paging over a filtered trip table.
//!
//! The paginator owns the display order (an index permutation of the table)
//! and the cursor, so a session can leave the raw-data view and come back to
//! the same position and sort.

use std::cmp::Ordering;

use bikeshare_core::models::TripRecord;
use tracing::debug;

/// Rows emitted per page.
pub const PAGE_SIZE: usize = 5;

// ── Sort options ──────────────────────────────────────────────────────────────

/// Column the raw view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
}

impl SortKey {
    /// Answers accepted at the sort prompt; the empty answer means unsorted.
    pub const CODES: &'static [&'static str] = &["st", "et", "td", "ss", "es", ""];

    /// `None` for the unsorted answer or an unknown code.
    pub fn from_code(code: &str) -> Option<SortKey> {
        match code {
            "st" => Some(SortKey::StartTime),
            "et" => Some(SortKey::EndTime),
            "td" => Some(SortKey::TripDuration),
            "ss" => Some(SortKey::StartStation),
            "es" => Some(SortKey::EndStation),
            _ => None,
        }
    }

    fn compare(self, a: &TripRecord, b: &TripRecord) -> Ordering {
        match self {
            SortKey::StartTime => a.start_time.cmp(&b.start_time),
            SortKey::EndTime => a.end_time.cmp(&b.end_time),
            SortKey::TripDuration => a.trip_duration.total_cmp(&b.trip_duration),
            SortKey::StartStation => a.start_station.cmp(&b.start_station),
            SortKey::EndStation => a.end_station.cmp(&b.end_station),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const CODES: &'static [&'static str] = &["a", "d"];

    pub fn from_code(code: &str) -> Option<SortDirection> {
        match code {
            "a" => Some(SortDirection::Ascending),
            "d" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

// ── Paging ────────────────────────────────────────────────────────────────────

/// Rows `order[cursor..cursor + PAGE_SIZE]` of `records`, and the cursor
/// advanced past them (never beyond `order.len()`).
pub fn page<'a>(
    records: &'a [TripRecord],
    order: &[usize],
    cursor: usize,
) -> (Vec<&'a TripRecord>, usize) {
    let start = cursor.min(order.len());
    let end = (start + PAGE_SIZE).min(order.len());
    let rows = order[start..end]
        .iter()
        .filter_map(|&i| records.get(i))
        .collect();
    (rows, end)
}

/// Display order and position for one loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    order: Vec<usize>,
    cursor: usize,
}

impl Paginator {
    /// Source order, cursor at the first row.
    pub fn new(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every row has been shown.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Back to source order and the first row.
    pub fn reset(&mut self) {
        self.order = (0..self.order.len()).collect();
        self.cursor = 0;
        debug!("raw data cursor reset");
    }

    /// Reorder the whole view by `key` and rewind.
    ///
    /// Sorting always starts from source order and is stable in both
    /// directions, so equal keys keep their source order.
    pub fn sort(&mut self, records: &[TripRecord], key: SortKey, direction: SortDirection) {
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by(|&a, &b| {
            let ord = key.compare(&records[a], &records[b]);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        self.order = order;
        self.cursor = 0;
        debug!(?key, ?direction, "raw data sorted");
    }

    /// Emit the next page and advance the cursor.
    pub fn next_page<'a>(&mut self, records: &'a [TripRecord]) -> Vec<&'a TripRecord> {
        let (rows, cursor) = page(records, &self.order, self.cursor);
        debug!(from = self.cursor, to = cursor, "raw data page");
        self.cursor = cursor;
        rows
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
