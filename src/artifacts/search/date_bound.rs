//! Date resolution for `after:` and `before:`
//!
//! Two shapes are accepted:
//!
//! - Relative: `<n>d`, `<n>w`, `<n>m`, `<n>y`, counted back from the wall clock
//!   at parse time. A month is 30 days and a year is 365 days; no calendar
//!   arithmetic is involved.
//! - Absolute: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS][Z]`.
//!   Date-only forms and forms ending in `Z` are UTC, date-time forms without
//!   `Z` are local time.
//!
//! The shape is checked with a regex before any date is constructed, and a
//! shape that passes but names no real instant (`2024-02-30`) is still
//! rejected.

use crate::artifacts::search::{ABSOLUTE_DATE_REGEX, RELATIVE_DATE_REGEX};
use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

pub const ACCEPTED_DATE_FORMATS: &str =
    "expected 7d, 2w, 3m, 1y, YYYY, YYYY-MM, YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS][Z]";

/// Resolve a date qualifier value against `now`
///
/// # Returns
///
/// - `Ok(Some(instant))` for a well-formed, valid date
/// - `Ok(None)` when the value has neither accepted shape or names no real instant
/// - `Err(_)` only if the shape patterns themselves fail to compile
pub fn resolve(raw: &str, now: DateTime<Utc>) -> anyhow::Result<Option<DateTime<Utc>>> {
    if let Some(instant) = resolve_relative(raw, now)? {
        return Ok(Some(instant));
    }

    resolve_absolute(raw)
}

fn resolve_relative(raw: &str, now: DateTime<Utc>) -> anyhow::Result<Option<DateTime<Utc>>> {
    let re = regex::Regex::new(RELATIVE_DATE_REGEX)
        .with_context(|| format!("invalid relative date regex: {RELATIVE_DATE_REGEX}"))?;

    let Some(caps) = re.captures(raw) else {
        return Ok(None);
    };

    let Ok(count) = caps[1].parse::<i64>() else {
        return Ok(None);
    };
    let days_per_unit = match caps[2].to_ascii_lowercase().as_str() {
        "d" => 1,
        "w" => 7,
        "m" => 30,
        _ => 365,
    };

    Ok(count
        .checked_mul(days_per_unit)
        .and_then(TimeDelta::try_days)
        .and_then(|delta| now.checked_sub_signed(delta)))
}

fn resolve_absolute(raw: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
    let re = regex::Regex::new(ABSOLUTE_DATE_REGEX)
        .with_context(|| format!("invalid absolute date regex: {ABSOLUTE_DATE_REGEX}"))?;

    let Some(caps) = re.captures(raw) else {
        return Ok(None);
    };

    let number = |idx: usize, default: u32| -> u32 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(default)
    };

    let Ok(year) = caps[1].parse::<i32>() else {
        return Ok(None);
    };
    let Some(date) = NaiveDate::from_ymd_opt(year, number(2, 1), number(3, 1)) else {
        return Ok(None);
    };

    if caps.get(4).is_none() {
        return Ok(Some(date.and_time(NaiveTime::MIN).and_utc()));
    }

    let Some(time) = NaiveTime::from_hms_opt(number(4, 0), number(5, 0), number(6, 0)) else {
        return Ok(None);
    };
    let naive = NaiveDateTime::new(date, time);

    if caps.get(7).is_some() {
        Ok(Some(naive.and_utc()))
    } else {
        Ok(Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc)))
    }
}
