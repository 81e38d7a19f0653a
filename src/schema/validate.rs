//! Attribute checks run before translation

use chrono::DateTime;
use gfwapi::{Error, Result};

/// Check that a value belongs to an allowed set
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(Error::validation(
        field,
        format!("expected one of [{}], got \"{value}\"", allowed.join(", ")),
    ))
}

/// Check an optional value against an allowed set
pub fn optional_one_of(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<()> {
    value.map_or(Ok(()), |v| one_of(field, v, allowed))
}

/// Check a value that must be present against an allowed set
pub fn required_one_of(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<()> {
    match value {
        Some(v) => one_of(field, v, allowed),
        None => Err(Error::validation(field, "is required")),
    }
}

/// Check every element of a list against an allowed set
pub fn all_of(field: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    values
        .iter()
        .enumerate()
        .try_for_each(|(i, v)| one_of(&format!("{field}.{i}"), v, allowed))
}

/// Check that a string is not empty
pub fn not_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Check an ISO-8601 timestamp
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`, `2024-01-01T00:00:00.000+02:00`)
/// and the compact offset form `2024-01-01T00:00:00+0200`.
pub fn iso8601(field: &str, value: &str) -> Result<()> {
    if DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z").is_ok()
    {
        return Ok(());
    }
    Err(Error::validation(
        field,
        format!("expected a valid ISO-8601 date, got \"{value}\""),
    ))
}

/// Check an optional ISO-8601 timestamp
pub fn optional_iso8601(field: &str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| iso8601(field, v))
}
