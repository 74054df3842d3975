use crate::domain::inspection::Inspection;
use crate::domain::status::next_inspection_date;
use crate::errors::AppError;
use crate::reports::summary_report::row_status;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 11] = [
    "ID",
    "Tag",
    "Equipment Type",
    "Platform",
    "Module",
    "Sector",
    "Last Inspection",
    "Inspection Date",
    "Damage Category",
    "Next Inspection",
    "Status",
];

/// Flat summary table of inspections as an `.xlsx` workbook.
pub fn export_inspections_xlsx(
    inspections: &[Inspection],
    validity_months: u32,
    today: NaiveDate,
) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| AppError::Io(format!("Failed to write header '{}': {}", header, e)))?;
    }

    for (i, inspection) in inspections.iter().enumerate() {
        let r = (i + 1) as u32;
        let f = &inspection.fields;

        worksheet.write_number(r, 0, inspection.id as f64)?;

        let cells = [
            &f.tag,
            &f.equipment_type,
            &f.platform,
            &f.module,
            &f.sector,
            &f.last_inspection_date,
            &f.inspection_date,
            &f.damage_category,
        ];
        for (offset, value) in cells.iter().enumerate() {
            worksheet
                .write_string(r, (offset + 1) as u16, value.as_str())
                .map_err(|e| AppError::Io(format!("Failed to write row {}: {}", r, e)))?;
        }

        let next = next_inspection_date(&f.last_inspection_date, validity_months).unwrap_or_default();
        worksheet.write_string(r, 9, next)?;
        worksheet.write_string(r, 10, row_status(inspection, validity_months, today))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::Io(format!("Failed to save workbook: {}", e)))
}
