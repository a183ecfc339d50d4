use crate::utils::error::{ErganiError, Result, ValidationError};
use chrono::{NaiveDate, NaiveTime, Timelike};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ErganiError::Config {
            field: field_name.to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ErganiError::Config {
                field: field_name.to_string(),
                message: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ErganiError::Config {
            field: field_name.to_string(),
            message: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ErganiError::Config {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ErganiError::Config {
            field: field_name.to_string(),
            message: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Required text field: rejects empty and whitespace-only values.
pub fn require_text(field_name: &str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn require_entries<T>(field_name: &str, entries: &[T]) -> std::result::Result<(), ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::EmptyList {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Ergani receives times as `HH:MM`, so the bounds are compared at minute precision.
pub fn validate_time_range(
    field_name: &str,
    start: NaiveTime,
    end: NaiveTime,
) -> std::result::Result<(), ValidationError> {
    if minute_of_day(end) <= minute_of_day(start) {
        return Err(ValidationError::InvalidTimeRange {
            field: field_name.to_string(),
            start: start.format("%H:%M").to_string(),
            end: end.format("%H:%M").to_string(),
        });
    }
    Ok(())
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn validate_date_range(
    field_name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> std::result::Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::InvalidDateRange {
            field: field_name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
