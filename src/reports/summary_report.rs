use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup};
use std::collections::BTreeMap;

use super::document::{field_table, report_document};
use crate::domain::dates::parse_date;
use crate::domain::inspection::Inspection;
use crate::domain::status::{inspection_status, is_overdue};

pub const SUMMARY_TITLE: &str = "INSPECTION SUMMARY REPORT";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub total: usize,
    pub overdue: usize,
    pub on_time: usize,
    pub by_equipment_type: BTreeMap<String, usize>,
    pub by_platform: BTreeMap<String, usize>,
}

/// Counts records, overdue ones, and the per-type and per-platform split.
/// A record whose last-inspection date cannot be parsed, or whose due date
/// is out of range, is not counted as overdue.
pub fn summarize(inspections: &[Inspection], validity_months: u32, today: NaiveDate) -> SummaryStats {
    let mut stats = SummaryStats {
        total: inspections.len(),
        ..Default::default()
    };

    for inspection in inspections {
        let f = &inspection.fields;
        *stats.by_equipment_type.entry(f.equipment_type.clone()).or_insert(0) += 1;
        *stats.by_platform.entry(f.platform.clone()).or_insert(0) += 1;

        let overdue = parse_date(&f.last_inspection_date)
            .and_then(|last| is_overdue(last, validity_months, today));
        if let Ok(true) = overdue {
            stats.overdue += 1;
        }
    }

    stats.on_time = stats.total - stats.overdue;
    stats
}

/// Status message for a table row; unreadable dates are shown as such.
pub fn row_status(inspection: &Inspection, validity_months: u32, today: NaiveDate) -> String {
    match inspection_status(&inspection.fields.last_inspection_date, validity_months, today) {
        Ok(status) => status.message,
        Err(e) => e.to_string(),
    }
}

pub fn render_summary_report(
    inspections: &[Inspection],
    validity_months: u32,
    today: NaiveDate,
    generated_at: NaiveDateTime,
) -> Markup {
    let stats = summarize(inspections, validity_months, today);

    report_document(
        SUMMARY_TITLE,
        generated_at,
        html! {
            section {
                h2 { "OVERALL STATISTICS" }
                (field_table(("Metric", "Value"), &[
                    ("Total Inspections", stats.total.to_string()),
                    ("Overdue Inspections", stats.overdue.to_string()),
                    ("On-time Inspections", stats.on_time.to_string()),
                ]))
                h3 { "By equipment type" }
                (count_table(&stats.by_equipment_type))
                h3 { "By platform" }
                (count_table(&stats.by_platform))
            }
            section {
                h2 { "INSPECTIONS" }
                table {
                    thead {
                        tr {
                            th { "Tag" }
                            th { "Type" }
                            th { "Platform" }
                            th { "Last Inspection" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        @for inspection in inspections {
                            tr {
                                td { (inspection.fields.tag) }
                                td { (inspection.fields.equipment_type) }
                                td { (inspection.fields.platform) }
                                td { (inspection.fields.last_inspection_date) }
                                td { (row_status(inspection, validity_months, today)) }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn count_table(counts: &BTreeMap<String, usize>) -> Markup {
    let rows: Vec<(&str, String)> = counts
        .iter()
        .map(|(name, n)| (name.as_str(), n.to_string()))
        .collect();
    field_table(("Name", "Count"), &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inspection::InspectionFields;

    fn record(id: i64, last: &str) -> Inspection {
        let at = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Inspection {
            id,
            fields: InspectionFields {
                equipment_type: "Tank".into(),
                platform: "P-1".into(),
                last_inspection_date: last.into(),
                ..Default::default()
            },
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn out_of_range_due_date_is_not_overdue() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let records = [record(1, "2020-01-01"), record(2, "2024-12-01")];

        let stats = summarize(&records, u32::MAX, today);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.on_time, 2);
        assert!(row_status(&records[0], u32::MAX, today).contains("out of range"));

        let normal = summarize(&records, 12, today);
        assert_eq!(normal.overdue, 1);
    }
}
