use chrono::{DateTime, NaiveDate, NaiveDateTime};
use terpsense_core::CoreError;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

pub fn validate_non_negative(value: f64, name: &str) -> Result<f64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid_input(format!("{} must be a number", name)));
    }
    if value < 0.0 {
        return Err(CoreError::invalid_input(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// Parse a raw value such as a form field or CSV cell, then validate it.
pub fn parse_non_negative(raw: &str, name: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::invalid_input(format!("{} must be a number", name)))?;
    validate_non_negative(value, name)
}

/// Parse an ISO 8601 date or date-time.
///
/// Offsets are accepted but not applied: the wall-clock time written in the
/// string is returned.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn validate_date_string(value: &str) -> bool {
    parse_iso_datetime(value).is_some()
}

pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}
