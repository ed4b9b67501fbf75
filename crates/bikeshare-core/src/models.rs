use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::error::{BikeshareError, Result};
use crate::registry::{self, City, Column};

/// One trip read from a city source, plus the time parts derived from its
/// start timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Row label from the unnamed first column, when the source has one.
    pub index: Option<u64>,
    /// Local time the trip started.
    pub start_time: NaiveDateTime,
    /// Local time the trip ended.
    pub end_time: NaiveDateTime,
    /// Trip length in seconds, fractional for sources that record it so.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// Rider category, e.g. `"Subscriber"`. `None` when the cell is blank.
    pub user_type: Option<String>,
    /// `None` when the source has no Gender column or the cell is blank.
    pub gender: Option<String>,
    /// `None` when the source has no Birth Year column or the cell is blank.
    pub birth_year: Option<i32>,
    /// Calendar month of `start_time` (1-based).
    pub month: u32,
    /// Day of week of `start_time`.
    pub weekday: Weekday,
    /// Hour of `start_time` (0-23).
    pub start_hour: u32,
}

impl TripRecord {
    /// Build a record and derive its month, weekday and start hour.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: Option<u64>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        trip_duration: f64,
        start_station: String,
        end_station: String,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            index,
            month: start_time.month(),
            weekday: start_time.weekday(),
            start_hour: start_time.hour(),
            start_time,
            end_time,
            trip_duration,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
        }
    }

    /// Title-cased weekday label, e.g. `"Monday"`.
    pub fn weekday_label(&self) -> &'static str {
        registry::weekday_label(self.weekday)
    }

    /// Combined `"start - end"` text identifying the route.
    pub fn station_pair(&self) -> String {
        format!("{} - {}", self.start_station, self.end_station)
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// Validated cities, months and weekdays chosen by the user.
///
/// Every value is a member of its registry set and each list is non-empty;
/// repeated values are collapsed, keeping first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    cities: Vec<City>,
    months: Vec<u32>,
    weekdays: Vec<Weekday>,
}

impl FilterSelection {
    /// Validate raw (lowercase) names against the registry.
    pub fn from_names<S: AsRef<str>>(
        cities: &[S],
        months: &[S],
        weekdays: &[S],
    ) -> Result<Self> {
        let cities = resolve("city", cities, City::from_key)?;
        let months = resolve("month", months, registry::month_ordinal)?;
        let weekdays = resolve("weekday", weekdays, registry::weekday_from_name)?;
        Ok(Self {
            cities,
            months,
            weekdays,
        })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Selected months as 1-based ordinals.
    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Title-cased month names, for confirmation prompts.
    pub fn month_labels(&self) -> Vec<String> {
        self.months
            .iter()
            .filter_map(|m| registry::month_label(*m))
            .collect()
    }

    /// Title-cased weekday labels, for confirmation prompts.
    pub fn weekday_labels(&self) -> Vec<&'static str> {
        self.weekdays
            .iter()
            .map(|d| registry::weekday_label(*d))
            .collect()
    }
}

fn resolve<S, T, F>(kind: &'static str, names: &[S], lookup: F) -> Result<Vec<T>>
where
    S: AsRef<str>,
    T: PartialEq,
    F: Fn(&str) -> Option<T>,
{
    if names.is_empty() {
        return Err(BikeshareError::InvalidSelection {
            kind,
            value: String::new(),
        });
    }

    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let value = lookup(name).ok_or_else(|| BikeshareError::InvalidSelection {
            kind,
            value: name.to_string(),
        })?;
        if !resolved.contains(&value) {
            resolved.push(value);
        }
    }
    Ok(resolved)
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// Trips from one or more cities, with the set of source columns present.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    /// Cities the rows came from, in load order.
    pub cities: Vec<City>,
    /// Source columns present in at least one loaded file, canonical order.
    pub columns: Vec<Column>,
    pub records: Vec<TripRecord>,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Same cities and columns, different rows.
    pub fn with_records(&self, records: Vec<TripRecord>) -> Self {
        Self {
            cities: self.cities.clone(),
            columns: self.columns.clone(),
            records,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
