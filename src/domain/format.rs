//! Display helpers for dates, times and weekday flags.

use crate::domain::models::WeekdayFlags;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// A configured display zone: an IANA name, or `UTC`/`GMT` with an optional `±HH[:MM]` offset.
#[derive(Clone, Copy)]
enum DisplayZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl DisplayZone {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let prefix = raw.get(..3).map(str::to_ascii_uppercase);
        if matches!(prefix.as_deref(), Some("UTC" | "GMT")) {
            return utc_offset(&raw[3..]).map(Self::Fixed);
        }
        raw.parse::<Tz>().ok().map(Self::Named)
    }
}

/// `""` is UTC itself; otherwise a signed hour count with optional minutes.
fn utc_offset(suffix: &str) -> Option<FixedOffset> {
    let suffix = suffix.trim();
    let sign = match suffix.chars().next() {
        None => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };
    let digits = &suffix[1..];
    let (hours, minutes) = digits.split_once(':').unwrap_or((digits, "0"));
    let hours: i32 = hours.trim().parse().ok()?;
    let minutes: i32 = minutes.trim().parse().ok()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Canonical spelling of a timezone setting, or `None` when it can't be resolved.
pub fn normalize_timezone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let normalized = if trimmed == "Europe/Kiev" {
        "Europe/Kyiv".to_string()
    } else if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("gmt") {
        "UTC".to_string()
    } else {
        trimmed.to_string()
    };

    DisplayZone::parse(&normalized).map(|_| normalized)
}

/// "Jan 6, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// A single date when both ends match, otherwise "start → end".
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format_date(start)
    } else {
        format!("{} → {}", format_date(start), format_date(end))
    }
}

/// "9:05 AM"
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Timestamp in the configured display zone; unknown zones fall back to UTC.
pub fn format_timestamp(raw_tz: &str, utc_dt: DateTime<Utc>) -> String {
    const PATTERN: &str = "%b %-d, %Y %-I:%M %p";
    match DisplayZone::parse(raw_tz) {
        Some(DisplayZone::Named(tz)) => utc_dt.with_timezone(&tz).format(PATTERN).to_string(),
        Some(DisplayZone::Fixed(offset)) => utc_dt.with_timezone(&offset).format(PATTERN).to_string(),
        None => utc_dt.format(PATTERN).to_string(),
    }
}

/// Calendar date at `utc_dt` in the configured display zone.
pub fn local_date(raw_tz: &str, utc_dt: DateTime<Utc>) -> NaiveDate {
    match DisplayZone::parse(raw_tz) {
        Some(DisplayZone::Named(tz)) => utc_dt.with_timezone(&tz).date_naive(),
        Some(DisplayZone::Fixed(offset)) => utc_dt.with_timezone(&offset).date_naive(),
        None => utc_dt.date_naive(),
    }
}

pub fn format_weekdays(flags: &WeekdayFlags) -> String {
    let days = flags.days();
    match days.len() {
        0 => "Never".to_string(),
        7 => "Every day".to_string(),
        5 if !flags.saturday && !flags.sunday => "Weekdays".to_string(),
        2 if flags.saturday && flags.sunday => "Weekends".to_string(),
        _ => days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
