// src/domain/status.rs

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use crate::domain::dates::{format_date, format_short, parse_date, DateError};

pub const DEFAULT_VALIDITY_MONTHS: u32 = 12;

/// Validity is counted in fixed 30-day months, so twelve months is 360 days
/// rather than a calendar year.
pub const DAYS_PER_MONTH: i64 = 30;

pub const WARNING_DAYS: i64 = 30;
pub const ATTENTION_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Unknown,
    Overdue,
    Warning,
    Attention,
    Ok,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Unknown => "unknown",
            StatusClass::Overdue => "overdue",
            StatusClass::Warning => "warning",
            StatusClass::Attention => "attention",
            StatusClass::Ok => "ok",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusClass::Unknown => "Date not provided",
            StatusClass::Overdue => "Inspection overdue!",
            StatusClass::Warning => "Inspection due soon",
            StatusClass::Attention => "Inspection due in a few months",
            StatusClass::Ok => "Inspection up to date",
        }
    }

    /// Classifies a signed day count. Negative means the due date has passed.
    pub fn from_days_until_due(days: i64) -> Self {
        if days < 0 {
            StatusClass::Overdue
        } else if days <= WARNING_DAYS {
            StatusClass::Warning
        } else if days <= ATTENTION_DAYS {
            StatusClass::Attention
        } else {
            StatusClass::Ok
        }
    }
}

/// Derived view over a last-inspection date. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionStatus {
    pub status: StatusClass,
    pub message: String,
    pub is_overdue: bool,
    pub days_until_due: i64,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
}

impl InspectionStatus {
    fn unknown() -> Self {
        Self {
            status: StatusClass::Unknown,
            message: StatusClass::Unknown.message().to_string(),
            is_overdue: false,
            days_until_due: 0,
            last_inspection_date: None,
            next_inspection_date: None,
        }
    }

    pub fn next_due_display(&self) -> String {
        self.next_inspection_date.map(format_short).unwrap_or_default()
    }

    pub fn last_display(&self) -> String {
        self.last_inspection_date.map(format_short).unwrap_or_default()
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fails with `OutOfRange` when the due date lies past the last
/// representable calendar date.
pub fn next_due_date(last: NaiveDate, validity_months: u32) -> Result<NaiveDate, DateError> {
    let out_of_range =
        || DateError::OutOfRange(format!("{} plus {validity_months} months", format_date(last)));
    let days = Duration::try_days(i64::from(validity_months) * DAYS_PER_MONTH)
        .ok_or_else(out_of_range)?;
    last.checked_add_signed(days).ok_or_else(out_of_range)
}

pub fn days_until_due(
    last: NaiveDate,
    validity_months: u32,
    today: NaiveDate,
) -> Result<i64, DateError> {
    Ok((next_due_date(last, validity_months)? - today).num_days())
}

pub fn is_overdue(last: NaiveDate, validity_months: u32, today: NaiveDate) -> Result<bool, DateError> {
    Ok(today > next_due_date(last, validity_months)?)
}

/// Text-level entry point: `2024-03-15` with twelve months gives `2025-03-10`.
pub fn next_inspection_date(last: &str, validity_months: u32) -> Result<String, DateError> {
    let last = parse_date(last)?;
    Ok(format_date(next_due_date(last, validity_months)?))
}

/// Full status for a stored last-inspection date. An empty date is `Unknown`,
/// a malformed one is an error.
pub fn inspection_status(
    last: &str,
    validity_months: u32,
    today: NaiveDate,
) -> Result<InspectionStatus, DateError> {
    if last.trim().is_empty() {
        return Ok(InspectionStatus::unknown());
    }

    let last = parse_date(last)?;
    let next = next_due_date(last, validity_months)?;
    let days = (next - today).num_days();
    let status = StatusClass::from_days_until_due(days);

    Ok(InspectionStatus {
        status,
        message: status.message().to_string(),
        is_overdue: days < 0,
        days_until_due: days,
        last_inspection_date: Some(last),
        next_inspection_date: Some(next),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_due_uses_thirty_day_months() {
        assert_eq!(next_inspection_date("2024-03-15", 12).unwrap(), "2025-03-10");
        assert_eq!(next_due_date(ymd(2024, 1, 1), 1), Ok(ymd(2024, 1, 31)));
        assert_eq!(next_due_date(ymd(2024, 1, 1), 0), Ok(ymd(2024, 1, 1)));
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(StatusClass::from_days_until_due(-1), StatusClass::Overdue);
        assert_eq!(StatusClass::from_days_until_due(0), StatusClass::Warning);
        assert_eq!(StatusClass::from_days_until_due(30), StatusClass::Warning);
        assert_eq!(StatusClass::from_days_until_due(31), StatusClass::Attention);
        assert_eq!(StatusClass::from_days_until_due(90), StatusClass::Attention);
        assert_eq!(StatusClass::from_days_until_due(91), StatusClass::Ok);
    }

    #[test]
    fn overdue_matches_sign_of_days() {
        let last = ymd(2023, 6, 1);
        let due = next_due_date(last, DEFAULT_VALIDITY_MONTHS).unwrap();

        for offset in -400..=400 {
            let today = due + Duration::days(offset);
            let days = days_until_due(last, DEFAULT_VALIDITY_MONTHS, today).unwrap();
            assert_eq!(days, -offset);
            assert_eq!(is_overdue(last, DEFAULT_VALIDITY_MONTHS, today).unwrap(), days < 0);
        }
    }

    #[test]
    fn status_for_dates() {
        let today = ymd(2025, 3, 1);

        let st = inspection_status("2024-03-15", 12, today).unwrap();
        assert_eq!(st.status, StatusClass::Warning);
        assert_eq!(st.days_until_due, 9);
        assert_eq!(st.next_inspection_date, Some(ymd(2025, 3, 10)));
        assert_eq!(st.next_due_display(), "10/03/2025");
        assert!(!st.is_overdue);

        let late = inspection_status("2024-03-15", 12, ymd(2025, 3, 11)).unwrap();
        assert_eq!(late.status, StatusClass::Overdue);
        assert!(late.is_overdue);
        assert_eq!(late.message, "Inspection overdue!");

        let fresh = inspection_status("2025-02-01", 12, today).unwrap();
        assert_eq!(fresh.status, StatusClass::Ok);
    }

    #[test]
    fn empty_is_unknown_and_garbage_is_an_error() {
        let today = ymd(2025, 3, 1);
        let st = inspection_status("  ", 12, today).unwrap();
        assert_eq!(st.status, StatusClass::Unknown);
        assert_eq!(st.next_inspection_date, None);

        assert!(matches!(
            inspection_status("2024/03/15", 12, today),
            Err(DateError::Malformed(_))
        ));
    }

    #[test]
    fn due_date_past_calendar_end_is_an_error() {
        let near_end = NaiveDate::MAX - Duration::days(10);
        assert!(matches!(
            next_due_date(near_end, 12),
            Err(DateError::OutOfRange(_))
        ));
        assert!(matches!(
            is_overdue(near_end, 12, ymd(2025, 3, 1)),
            Err(DateError::OutOfRange(_))
        ));

        // An oversized validity period fails the same way for ordinary dates.
        assert!(matches!(
            inspection_status("2024-03-15", u32::MAX, ymd(2025, 3, 1)),
            Err(DateError::OutOfRange(_))
        ));
        assert!(matches!(
            next_inspection_date("2024-03-15", u32::MAX),
            Err(DateError::OutOfRange(_))
        ));
    }

    #[test]
    fn serializes_lowercase_class() {
        let st = inspection_status("2024-03-15", 12, ymd(2025, 3, 1)).unwrap();
        let json = serde_json::to_value(&st).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["next_inspection_date"], "2025-03-10");
    }
}
