//! Descriptive statistics over a filtered trip table.
//!
//! Four independent aggregations: popular travel times, popular stations,
//! trip duration totals, and rider demographics. All of them accept an empty
//! table and report missing results instead of failing.

use std::collections::HashMap;
use std::hash::Hash;

use bikeshare_core::formatting::{format_minutes_seconds, DurationBreakdown};
use bikeshare_core::models::{TripRecord, TripTable};
use bikeshare_core::registry::{self, Column};
use chrono::Weekday;

// ── Frequency helpers ─────────────────────────────────────────────────────────

/// Count each distinct value, most frequent first.
///
/// Values with equal counts stay in the order they were first seen.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        match positions.get(&value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable: ties keep first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent value; on a tie, the one encountered first.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}

/// Result for a column that some sources do not carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    Available(T),
    /// The column is absent from the table or has no values in it.
    NoData,
}

// ── Time statistics ───────────────────────────────────────────────────────────

/// Most frequent times of travel. All `None` for an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeStats {
    /// 1-based month number.
    pub popular_month: Option<u32>,
    pub popular_weekday: Option<Weekday>,
    /// Hour of day, 0-23.
    pub popular_hour: Option<u32>,
}

impl TimeStats {
    /// Title-cased month name, e.g. `"June"`.
    pub fn popular_month_label(&self) -> Option<String> {
        self.popular_month.and_then(registry::month_label)
    }

    pub fn popular_weekday_label(&self) -> Option<&'static str> {
        self.popular_weekday.map(registry::weekday_label)
    }
}

pub fn time_stats(records: &[TripRecord]) -> TimeStats {
    TimeStats {
        popular_month: mode(records.iter().map(|r| r.month)),
        popular_weekday: mode(records.iter().map(|r| r.weekday)),
        popular_hour: mode(records.iter().map(|r| r.start_hour)),
    }
}

// ── Station statistics ────────────────────────────────────────────────────────

/// Most popular stations and route. All `None` for an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StationStats {
    pub popular_start: Option<String>,
    pub popular_end: Option<String>,
    /// Combined `"start - end"` route text.
    pub popular_trip: Option<String>,
}

pub fn station_stats(records: &[TripRecord]) -> StationStats {
    StationStats {
        popular_start: mode(records.iter().map(|r| r.start_station.as_str())).map(str::to_string),
        popular_end: mode(records.iter().map(|r| r.end_station.as_str())).map(str::to_string),
        popular_trip: mode(records.iter().map(TripRecord::station_pair)),
    }
}

// ── Trip duration statistics ──────────────────────────────────────────────────

/// Total and mean trip duration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationStats {
    pub trips: usize,
    /// Sum of the unrounded trip durations.
    pub total_secs: f64,
    /// `None` when there are no trips.
    pub mean_secs: Option<f64>,
}

impl DurationStats {
    pub fn total(&self) -> DurationBreakdown {
        DurationBreakdown::from_secs_f64(self.total_secs)
    }

    /// Mean as `"{m}m {s}s"`, or `None` when undefined.
    pub fn mean_label(&self) -> Option<String> {
        self.mean_secs.map(format_minutes_seconds)
    }
}

pub fn duration_stats(records: &[TripRecord]) -> DurationStats {
    let total_secs: f64 = records.iter().map(|r| r.trip_duration).sum();
    let mean_secs = if records.is_empty() {
        None
    } else {
        Some(total_secs / records.len() as f64)
    };

    DurationStats {
        trips: records.len(),
        total_secs,
        mean_secs,
    }
}

// ── User statistics ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Count per user type, most frequent first. Blank cells are skipped.
    pub user_types: Vec<(String, usize)>,
    pub genders: Availability<Vec<(String, usize)>>,
    pub birth_years: Availability<BirthYearStats>,
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let records = &table.records;

    let user_types = value_counts(records.iter().filter_map(|r| r.user_type.as_deref()))
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect();

    let genders = if table.has_column(Column::Gender) {
        let counts: Vec<(String, usize)> =
            value_counts(records.iter().filter_map(|r| r.gender.as_deref()))
                .into_iter()
                .map(|(v, n)| (v.to_string(), n))
                .collect();
        if counts.is_empty() {
            Availability::NoData
        } else {
            Availability::Available(counts)
        }
    } else {
        Availability::NoData
    };

    let birth_years = if table.has_column(Column::BirthYear) {
        birth_year_stats(records)
    } else {
        Availability::NoData
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn birth_year_stats(records: &[TripRecord]) -> Availability<BirthYearStats> {
    let years: Vec<i32> = records.iter().filter_map(|r| r.birth_year).collect();

    match (
        years.iter().min(),
        years.iter().max(),
        mode(years.iter().copied()),
    ) {
        (Some(&earliest), Some(&most_recent), Some(most_common)) => {
            Availability::Available(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            })
        }
        _ => Availability::NoData,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
