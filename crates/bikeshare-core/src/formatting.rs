use std::fmt;

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// A whole number of seconds split into days, hours, minutes and seconds.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::DurationBreakdown;
///
/// assert_eq!(DurationBreakdown::from_secs(360).to_string(), "0d 0h 6m 0s");
/// assert_eq!(DurationBreakdown::from_secs(90_061).to_string(), "1d 1h 1m 1s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_secs(total: u64) -> Self {
        let days = total / SECS_PER_DAY;
        let rest = total % SECS_PER_DAY;
        let hours = rest / SECS_PER_HOUR;
        let rest = rest % SECS_PER_HOUR;
        Self {
            days,
            hours,
            minutes: rest / SECS_PER_MINUTE,
            seconds: rest % SECS_PER_MINUTE,
        }
    }

    /// Break down fractional seconds; the fraction is dropped only here.
    ///
    /// ```
    /// use bikeshare_core::formatting::DurationBreakdown;
    ///
    /// assert_eq!(DurationBreakdown::from_secs_f64(1528.866).to_string(), "0d 0h 25m 28s");
    /// ```
    pub fn from_secs_f64(total: f64) -> Self {
        Self::from_secs(total.max(0.0).floor() as u64)
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Format a mean duration in seconds as whole minutes and seconds.
///
/// Fractions of a second are dropped.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_minutes_seconds;
///
/// assert_eq!(format_minutes_seconds(120.0), "2m 0s");
/// assert_eq!(format_minutes_seconds(754.9), "12m 34s");
/// assert_eq!(format_minutes_seconds(0.0), "0m 0s");
/// ```
pub fn format_minutes_seconds(secs: f64) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / SECS_PER_MINUTE as f64).floor() as u64;
    let seconds = (secs % SECS_PER_MINUTE as f64).floor() as u64;
    format!("{}m {}s", minutes, seconds)
}

/// Format an unsigned count with thousands separators.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Wall-clock seconds as shown in timing lines, e.g. `"0.0421"`.
pub fn format_elapsed(secs: f64) -> String {
    format!("{:.4}", secs.max(0.0))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
