//! Plain-text table for pages of raw trip rows.
//!
//! Renders one header line plus one line per trip, with columns padded to
//! their display width so station names containing wide characters still
//! line up.

use std::io::{self, Write};

use bikeshare_core::models::TripRecord;
use bikeshare_core::registry::Column;
use bikeshare_core::time_utils::format_timestamp;
use unicode_width::UnicodeWidthStr;

/// Gap between adjacent columns.
const COLUMN_GAP: &str = "  ";

/// Headers of the derived columns appended after the source columns.
const DERIVED_HEADERS: [&str; 3] = ["Month", "Weekday", "Start Hour"];

/// Header text for a source column in the raw-data table.
fn column_title(column: Column) -> &'static str {
    match column {
        Column::Index => "Index",
        other => other.header(),
    }
}

/// Cell text of `column` for one trip; missing values render empty.
fn cell(record: &TripRecord, column: Column) -> String {
    match column {
        Column::Index => record.index.map(|i| i.to_string()).unwrap_or_default(),
        Column::StartTime => format_timestamp(&record.start_time),
        Column::EndTime => format_timestamp(&record.end_time),
        Column::TripDuration => record.trip_duration.to_string(),
        Column::StartStation => record.start_station.clone(),
        Column::EndStation => record.end_station.clone(),
        Column::UserType => record.user_type.clone().unwrap_or_default(),
        Column::Gender => record.gender.clone().unwrap_or_default(),
        Column::BirthYear => record.birth_year.map(|y| y.to_string()).unwrap_or_default(),
    }
}

/// Pad `text` with spaces up to `width` display columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(used));
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    padded
}

/// Build the header and body cells for `rows`, showing only `columns`
/// (the columns the loaded table actually has) plus the derived ones.
pub fn build_rows(columns: &[Column], rows: &[&TripRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let header: Vec<String> = columns
        .iter()
        .map(|c| column_title(*c).to_string())
        .chain(DERIVED_HEADERS.iter().map(|h| h.to_string()))
        .collect();

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| cell(record, *c))
                .chain([
                    record.month.to_string(),
                    record.weekday_label().to_string(),
                    record.start_hour.to_string(),
                ])
                .collect()
        })
        .collect();

    (header, body)
}

/// Write `rows` as an aligned table.
pub fn render_rows<W: Write>(out: &mut W, columns: &[Column], rows: &[&TripRecord]) -> io::Result<()> {
    let (header, body) = build_rows(columns, rows);

    let mut widths: Vec<usize> = header.iter().map(|h| UnicodeWidthStr::width(h.as_str())).collect();
    for line in &body {
        for (i, text) in line.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(text.as_str()));
        }
    }

    write_line(out, &header, &widths)?;
    for line in &body {
        write_line(out, line, &widths)?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| pad_right(text, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(out, "{}", line.trim_end())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
