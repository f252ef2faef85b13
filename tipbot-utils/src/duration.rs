//! Duration expressions such as `1Y`, `2 days 3 hours` or `1d 2H 3m 4s`.
//!
//! Units must appear in descending order of magnitude: years, months, weeks,
//! days, hours, minutes, seconds. A bare `m` is accepted for both months and
//! minutes and binds by position: the first `m` group in scan order is months,
//! a later one is minutes. A month counts as 30 days and a year as 365 days.

use std::sync::OnceLock;

use chrono::{DateTime, TimeDelta, Utc};
use regex::{Captures, Regex};
use thiserror::Error;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DurationParseError {
    #[error("`{input}` is not a valid duration string.")]
    Invalid { input: String },
    #[error("`{input}` is too long a duration.")]
    OutOfRange { input: String },
}

impl DurationParseError {
    /// The input that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::Invalid { input } | Self::OutOfRange { input } => input,
        }
    }
}

/// Unit counts parsed from one duration expression. Absent units are zero.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DurationSpec {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationSpec {
    /// Offset described by this spec, or `None` when it overflows.
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        let days = self
            .years
            .checked_mul(DAYS_PER_YEAR)?
            .checked_add(self.months.checked_mul(DAYS_PER_MONTH)?)?
            .checked_add(self.days)?;

        [
            TimeDelta::try_weeks(self.weeks)?,
            TimeDelta::try_days(days)?,
            TimeDelta::try_hours(self.hours)?,
            TimeDelta::try_minutes(self.minutes)?,
            TimeDelta::try_seconds(self.seconds)?,
        ]
        .into_iter()
        .try_fold(TimeDelta::zero(), |total, part| total.checked_add(&part))
    }
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:(?P<years>[0-9]+) ?(?:years|year|Y|y) ?)?",
            r"(?:(?P<months>[0-9]+) ?(?:months|month|M|m) ?)?",
            r"(?:(?P<weeks>[0-9]+) ?(?:weeks|week|W|w) ?)?",
            r"(?:(?P<days>[0-9]+) ?(?:days|day|D|d) ?)?",
            r"(?:(?P<hours>[0-9]+) ?(?:hours|hour|H|h) ?)?",
            r"(?:(?P<minutes>[0-9]+) ?(?:minutes|minute|min|m) ?)?",
            r"(?:(?P<seconds>[0-9]+) ?(?:seconds|second|S|s))?$",
        ))
        .expect("duration pattern is a valid regex")
    })
}

/// Parse a duration expression into its unit counts.
pub fn parse_duration_spec(input: &str) -> Result<DurationSpec, DurationParseError> {
    let invalid = || DurationParseError::Invalid {
        input: input.to_owned(),
    };

    let captures = duration_pattern().captures(input).ok_or_else(invalid)?;

    const UNITS: [&str; 7] = [
        "years", "months", "weeks", "days", "hours", "minutes", "seconds",
    ];
    if UNITS.iter().all(|unit| captures.name(unit).is_none()) {
        return Err(invalid());
    }

    let count = |unit: &str| unit_count(&captures, unit, input);

    Ok(DurationSpec {
        years: count("years")?,
        months: count("months")?,
        weeks: count("weeks")?,
        days: count("days")?,
        hours: count("hours")?,
        minutes: count("minutes")?,
        seconds: count("seconds")?,
    })
}

fn unit_count(captures: &Captures<'_>, unit: &str, input: &str) -> Result<i64, DurationParseError> {
    match captures.name(unit) {
        Some(raw) => raw
            .as_str()
            .parse::<i64>()
            .map_err(|_| DurationParseError::OutOfRange {
                input: input.to_owned(),
            }),
        None => Ok(0),
    }
}

/// The instant `input` from `now`.
pub fn parse_duration_at(
    input: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, DurationParseError> {
    let spec = parse_duration_spec(input)?;

    spec.to_time_delta()
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| DurationParseError::OutOfRange {
            input: input.to_owned(),
        })
}

/// The UTC instant `input` from now.
pub fn parse_duration(input: &str) -> Result<DateTime<Utc>, DurationParseError> {
    parse_duration_at(input, Utc::now())
}
