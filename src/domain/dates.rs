// src/domain/dates.rs

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::errors::AppError;

/// The only textual date form accepted anywhere in the application.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How far back the current inspection date may lie.
pub const MAX_INSPECTION_AGE_DAYS: i64 = 30;
/// How far back the last inspection date may lie (ten years of 365 days).
pub const MAX_LAST_INSPECTION_AGE_DAYS: i64 = 3650;
/// Widest interval accepted by `validate_date_range`.
pub const MAX_RANGE_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid date '{0}', use YYYY-MM-DD")]
    Malformed(String),
    #[error("date out of range: {0}")]
    OutOfRange(String),
}

/// Parses a `YYYY-MM-DD` date. Surrounding whitespace is ignored; anything
/// chrono accepts but would print differently (`2024-3-5`, `+2024-03-05`)
/// is malformed, so stored dates compare correctly as text.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError::Missing("date"));
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DateError::Malformed(trimmed.to_string()))?;
    // Four-digit years only; chrono prints others with a sign.
    if trimmed.len() != 10 || format_date(date) != trimmed {
        return Err(DateError::Malformed(trimmed.to_string()));
    }
    Ok(date)
}

fn parse_named(input: &str, name: &'static str) -> Result<NaiveDate, DateError> {
    parse_date(input).map_err(|e| match e {
        DateError::Missing(_) => DateError::Missing(name),
        other => other,
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Checks the date of the inspection being recorded: not in the future and
/// not older than thirty days.
pub fn validate_inspection_date(input: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let date = parse_named(input, "inspection date")?;

    if date > today {
        return Err(AppError::Validation(
            "inspection date cannot be in the future".into(),
        ));
    }
    if date < today - Duration::days(MAX_INSPECTION_AGE_DAYS) {
        return Err(AppError::Validation(format!(
            "inspection date cannot be more than {MAX_INSPECTION_AGE_DAYS} days ago"
        )));
    }
    Ok(date)
}

/// Checks the previous inspection date: not in the future and not older than
/// ten years.
pub fn validate_last_inspection_date(
    input: &str,
    today: NaiveDate,
) -> Result<NaiveDate, AppError> {
    let date = parse_named(input, "last inspection date")?;

    if date > today {
        return Err(AppError::Validation(
            "last inspection date cannot be in the future".into(),
        ));
    }
    if date < today - Duration::days(MAX_LAST_INSPECTION_AGE_DAYS) {
        return Err(AppError::Validation(
            "last inspection date cannot be more than 10 years ago".into(),
        ));
    }
    Ok(date)
}

/// Validates a search interval. Both bounds are inclusive.
pub fn validate_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = parse_named(start, "start date")?;
    let end = parse_named(end, "end date")?;

    if start > end {
        return Err(AppError::Validation(
            "start date cannot be after end date".into(),
        ));
    }
    if (end - start).num_days() > MAX_RANGE_DAYS {
        return Err(AppError::Validation(
            "date range cannot be longer than one year".into(),
        ));
    }
    Ok((start, end))
}

/// `DD/MM/YYYY`, used in documents and tables.
pub fn format_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Human distance between `date` and `today`.
pub fn format_relative(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (today - date).num_days();
    match delta {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        -1 => "Tomorrow".to_string(),
        d if d > 0 => format!("{d} days ago"),
        d => format!("in {} days", -d),
    }
}
