//! Date boundary helpers.
//!
//! The domain keeps two distinct notions of time:
//! - a local calendar day (`NaiveDate`) for sale days, expense days and visit days
//! - an instant (`DateTime<Utc>`) for readings, maintenance runs and cash counts
//!
//! A calendar day is always compared against instants as *local midnight*.
//! Interpreting `2025-06-14` as UTC midnight shifts it to the previous day
//! for any operator west of Greenwich.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use log::debug;

use super::errors::{DomainError, DomainResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a user supplied calendar day.
///
/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (reduced to its local day).
pub fn parse_local_date(input: &str) -> DomainResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(local_date_of(timestamp.with_timezone(&Utc)));
    }
    Err(DomainError::validation(format!("Unparseable date '{}'", input)))
}

/// Parse a user supplied instant.
///
/// Accepts RFC 3339, or `YYYY-MM-DD` which is read as local midnight.
pub fn parse_instant(input: &str) -> DomainResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(local_midnight(date));
    }
    Err(DomainError::validation(format!("Unparseable timestamp '{}'", input)))
}

/// Resolve an optional override, falling back to `now`
pub fn instant_or_now(input: Option<&str>, now: DateTime<Utc>) -> DomainResult<DateTime<Utc>> {
    match input {
        Some(value) if !value.trim().is_empty() => parse_instant(value),
        _ => Ok(now),
    }
}

/// The instant a local calendar day begins
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(local) = Local.from_local_datetime(&midnight).earliest() {
        return local.with_timezone(&Utc);
    }
    // Midnight falls in a DST gap in a few zones; the day then starts an hour later.
    debug!("Local midnight of {} does not exist, using 01:00", date);
    Local
        .from_local_datetime(&(midnight + Duration::hours(1)))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// The local calendar day an instant falls on
pub fn local_date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Serialize a calendar day for the record store
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serialize an instant for the record store
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Read a calendar day back from the record store
pub fn parse_stored_date(value: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}

/// Read an instant back from the record store
pub fn parse_stored_instant(value: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
