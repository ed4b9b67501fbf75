//! Static dataset registry: supported cities, months, weekdays and the
//! canonical column layout of the city sources.

use std::fmt;

use chrono::Weekday;

// ── Cities ────────────────────────────────────────────────────────────────────

/// A city with a trip-data source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in registry order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name the user types to select the city.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Source file name, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Title-cased name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Look up a city by its (already normalised) key.
    pub fn from_key(key: &str) -> Option<City> {
        City::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Registry keys, for use as an allowed-value set.
    pub fn keys() -> Vec<&'static str> {
        City::ALL.iter().map(|c| c.key()).collect()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Join the display names of `cities`, e.g. `"Chicago, Washington"`.
pub fn describe_cities(cities: &[City]) -> String {
    cities
        .iter()
        .map(|c| c.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Months ────────────────────────────────────────────────────────────────────

/// Months covered by the datasets, in calendar order.
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// 1-based ordinal of a supported month name.
pub fn month_ordinal(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

/// Title-cased month name for a 1-based ordinal within the supported range.
pub fn month_label(ordinal: u32) -> Option<String> {
    let idx = usize::try_from(ordinal.checked_sub(1)?).ok()?;
    MONTHS.get(idx).map(|m| title_case(m))
}

// ── Weekdays ──────────────────────────────────────────────────────────────────

/// Weekday names, Sunday first.
pub const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const WEEKDAY_VALUES: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Resolve a lowercase weekday name.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .position(|d| *d == name)
        .map(|idx| WEEKDAY_VALUES[idx])
}

/// Title-cased label of a weekday, e.g. `"Monday"`.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

// ── Columns ───────────────────────────────────────────────────────────────────

/// Source columns, declared in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Index,
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    /// All columns in canonical order.
    pub const CANONICAL: [Column; 9] = [
        Column::Index,
        Column::StartTime,
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Columns every city source must provide.
    pub const REQUIRED: [Column; 6] = [
        Column::StartTime,
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
    ];

    /// Header text as it appears in the CSV files. The index column is unnamed.
    pub fn header(self) -> &'static str {
        match self {
            Column::Index => "",
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::TripDuration => "Trip Duration",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }

    /// Match a CSV header cell to a known column.
    ///
    /// Both an empty header and pandas' `"Unnamed: 0"` map to the index column.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        if header.is_empty() || header.starts_with("Unnamed") {
            return Some(Column::Index);
        }
        Column::CANONICAL
            .into_iter()
            .find(|c| *c != Column::Index && c.header() == header)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Upper-case the first letter of each space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
