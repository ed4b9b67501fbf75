//! Plain-text rendering of the statistics views.

use std::io::{self, Write};

use bikeshare_core::formatting::format_elapsed;
use bikeshare_core::registry::{describe_cities, City};
use bikeshare_data::statistics::{
    Availability, BirthYearStats, DurationStats, StationStats, TimeStats, UserStats,
};
use unicode_width::UnicodeWidthStr;

use crate::table_view::pad_right;

/// Width of the dashed line closing every view.
pub const SEPARATOR_WIDTH: usize = 40;

const NO_TRIPS: &str = "For the selected filters, no trips match.";

// ── Shared pieces ─────────────────────────────────────────────────────────────

/// `This took … seconds.` followed by the separator.
pub fn write_timing<W: Write>(out: &mut W, elapsed_secs: f64) -> io::Result<()> {
    writeln!(out, "\nThis took {} seconds.", format_elapsed(elapsed_secs))?;
    write_separator(out)
}

pub fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

/// Two-column listing of `(label, count)` pairs, counts right-aligned.
pub fn write_counts<W: Write>(out: &mut W, counts: &[(String, usize)]) -> io::Result<()> {
    let label_width = counts
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|(_, n)| n.to_string().len())
        .max()
        .unwrap_or(0);

    for (label, n) in counts {
        writeln!(
            out,
            "{}    {:>width$}",
            pad_right(label, label_width),
            n,
            width = count_width
        )?;
    }
    Ok(())
}

// ── Views ─────────────────────────────────────────────────────────────────────

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(
        out,
        "\nDisplaying the statistics on the most frequent times of travel...\n"
    )?;

    let (Some(month), Some(weekday), Some(hour)) = (
        stats.popular_month_label(),
        stats.popular_weekday_label(),
        stats.popular_hour,
    ) else {
        return writeln!(out, "{NO_TRIPS}");
    };

    writeln!(
        out,
        "For the selected filter, the month with the most travels is: {month}."
    )?;
    writeln!(
        out,
        "For the selected filter, the most common day of the week is: {weekday}."
    )?;
    writeln!(
        out,
        "For the selected filter, the most common start hour is: {hour}."
    )
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;

    let (Some(start), Some(end), Some(trip)) = (
        stats.popular_start.as_deref(),
        stats.popular_end.as_deref(),
        stats.popular_trip.as_deref(),
    ) else {
        return writeln!(out, "{NO_TRIPS}");
    };

    writeln!(
        out,
        "For the selected filters, the most common start station is: {start}."
    )?;
    writeln!(
        out,
        "For the selected filters, the most common end station is: {end}."
    )?;
    writeln!(
        out,
        "For the selected filters, the most common start-end combination of stations is: {trip}."
    )
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;
    writeln!(
        out,
        "For the selected filters, the total travel time is : {}.",
        stats.total()
    )?;
    match stats.mean_label() {
        Some(mean) => writeln!(
            out,
            "For the selected filters, the mean travel time is : {mean}."
        ),
        None => writeln!(
            out,
            "For the selected filters, the mean travel time is undefined: no trips match."
        ),
    }
}

/// User statistics; `cities` names the selection in no-data messages.
pub fn write_user_stats<W: Write>(
    out: &mut W,
    stats: &UserStats,
    cities: &[City],
) -> io::Result<()> {
    let cities = describe_cities(cities);

    writeln!(out, "\nCalculating User Stats...\n")?;
    writeln!(out, "Distribution for user types:")?;
    if stats.user_types.is_empty() {
        writeln!(out, "{NO_TRIPS}")?;
    } else {
        write_counts(out, &stats.user_types)?;
    }

    match &stats.genders {
        Availability::Available(counts) => {
            writeln!(out, "\nDistribution for each gender:")?;
            write_counts(out, counts)?;
        }
        Availability::NoData => {
            writeln!(
                out,
                "\nWe're sorry! There is no data of user genders for {cities}."
            )?;
        }
    }

    match &stats.birth_years {
        Availability::Available(years) => write_birth_years(out, years),
        Availability::NoData => writeln!(
            out,
            "\nWe're sorry! There is no data of birth year for {cities}."
        ),
    }
}

fn write_birth_years<W: Write>(out: &mut W, years: &BirthYearStats) -> io::Result<()> {
    writeln!(
        out,
        "\nFor the selected filter, the oldest person to ride one bike was born in: {}.",
        years.earliest
    )?;
    writeln!(
        out,
        "For the selected filter, the youngest person to ride one bike was born in: {}.",
        years.most_recent
    )?;
    writeln!(
        out,
        "For the selected filter, the most common birth year amongst riders is: {}.",
        years.most_common
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
