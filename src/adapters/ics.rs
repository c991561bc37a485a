//! iCalendar (ICS) source parsing.
//!
//! Only what the grid needs is read from each VEVENT: `DTSTART`, `DTEND`
//! or `DURATION`, and `SUMMARY`. Date-times are taken as wall-clock time;
//! a trailing `Z` is accepted but no zone conversion happens. A date-only
//! `DTSTART` is an all-day event lasting 24 hours.

use crate::domain::model::RawEvent;
use crate::utils::error::{RenderError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use ical::parser::ical::component::IcalEvent;
use regex::Regex;
use std::sync::OnceLock;

pub fn parse_ics_str(content: &str) -> Result<Vec<RawEvent>> {
    parse_ics_bytes(content.as_bytes())
}

pub fn parse_ics_bytes(data: &[u8]) -> Result<Vec<RawEvent>> {
    let reader = ical::IcalParser::new(data);
    let mut events = Vec::new();
    let mut without_start = 0usize;
    let mut out_of_range = 0usize;

    for calendar_result in reader {
        let calendar = calendar_result.map_err(|e| RenderError::CalendarParseError {
            message: format!("ICS parse error: {}", e),
        })?;

        for event in &calendar.events {
            match parse_event(event) {
                Ok(raw) => events.push(raw),
                Err(Skip::MissingStart) => without_start += 1,
                Err(Skip::OutOfRange) => out_of_range += 1,
            }
        }
    }

    if without_start > 0 {
        tracing::warn!("Skipped {} events without a usable DTSTART", without_start);
    }
    if out_of_range > 0 {
        tracing::warn!(
            "Skipped {} events whose end falls outside the representable date range",
            out_of_range
        );
    }
    tracing::debug!("Parsed {} events from calendar", events.len());
    Ok(events)
}

/// Why a VEVENT did not make it into the event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    MissingStart,
    OutOfRange,
}

fn parse_event(event: &IcalEvent) -> std::result::Result<RawEvent, Skip> {
    let mut start = None;
    let mut end = None;
    let mut duration = None;
    let mut label = String::new();

    for property in &event.properties {
        let Some(value) = property.value.as_deref() else {
            continue;
        };
        match property.name.as_str() {
            "DTSTART" => start = parse_date_time(value),
            "DTEND" => end = parse_date_time(value).map(|(at, _)| at),
            "DURATION" => duration = parse_duration(value)?,
            "SUMMARY" => label = unescape_text(value),
            _ => {}
        }
    }

    let (start, all_day) = start.ok_or(Skip::MissingStart)?;
    let end = match (end, duration) {
        (Some(end), _) => end,
        (None, Some(duration)) => start.checked_add_signed(duration).ok_or(Skip::OutOfRange)?,
        (None, None) if all_day => start
            .checked_add_signed(TimeDelta::days(1))
            .ok_or(Skip::OutOfRange)?,
        (None, None) => start,
    };

    Ok(RawEvent { start, end, label })
}

/// Returns the timestamp and whether the value was a bare date.
fn parse_date_time(value: &str) -> Option<(NaiveDateTime, bool)> {
    let value = value.trim();
    let stamp = value.strip_suffix('Z').unwrap_or(value);

    if let Ok(at) = NaiveDateTime::parse_from_str(stamp, "%Y%m%dT%H%M%S") {
        return Some((at, false));
    }
    NaiveDate::parse_from_str(stamp, "%Y%m%d")
        .ok()
        .map(|date| (date.and_time(NaiveTime::MIN), true))
}

/// RFC 5545 durations such as `PT1H30M`, `P1D` or `P2W`. `Ok(None)` means
/// the value is not a duration we understand (negative ones included); a
/// well-formed value too large for [`TimeDelta`] is out of range.
fn parse_duration(value: &str) -> std::result::Result<Option<TimeDelta>, Skip> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"^\+?P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
            .expect("duration pattern is valid")
    });

    let Some(caps) = re.captures(value.trim()) else {
        return Ok(None);
    };

    let units: [fn(i64) -> Option<TimeDelta>; 5] = [
        TimeDelta::try_weeks,
        TimeDelta::try_days,
        TimeDelta::try_hours,
        TimeDelta::try_minutes,
        TimeDelta::try_seconds,
    ];

    let mut total = TimeDelta::zero();
    for (index, unit) in units.iter().enumerate() {
        let Some(digits) = caps.get(index + 1) else {
            continue;
        };
        let part = digits
            .as_str()
            .parse::<i64>()
            .ok()
            .and_then(*unit)
            .ok_or(Skip::OutOfRange)?;
        total = total.checked_add(&part).ok_or(Skip::OutOfRange)?;
    }
    Ok(Some(total))
}

fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
