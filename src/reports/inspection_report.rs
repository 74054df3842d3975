use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup};
use std::fs;
use std::path::Path;

use super::document::{field_table, report_document};
use crate::domain::inspection::Inspection;
use crate::domain::status::{inspection_status, InspectionStatus};
use crate::errors::AppError;

pub const REPORT_TITLE: &str = "EQUIPMENT INSPECTION REPORT";

/// A photo ready to be inlined into a document.
pub struct EmbeddedPhoto {
    pub file_name: String,
    pub data_uri: String,
}

/// Loads the record's photo for embedding. A record without a photo, or whose
/// photo file no longer exists, yields `None`; a file that exists but is not
/// a readable image is an error.
pub fn load_photo(photo_path: Option<&str>) -> Result<Option<EmbeddedPhoto>, AppError> {
    let Some(path) = photo_path.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let path = Path::new(path);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Photo missing, section skipped");
        return Ok(None);
    }

    let bytes = fs::read(path)
        .map_err(|e| AppError::Io(format!("read photo {}: {e}", path.display())))?;
    let format = image::guess_format(&bytes)?;

    Ok(Some(EmbeddedPhoto {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        data_uri: format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(&bytes)),
    }))
}

/// Renders the full document for one inspection.
pub fn render_inspection_report(
    inspection: &Inspection,
    photo: Option<&EmbeddedPhoto>,
    validity_months: u32,
    today: NaiveDate,
    generated_at: NaiveDateTime,
) -> Result<Markup, AppError> {
    let status = inspection_status(&inspection.fields.last_inspection_date, validity_months, today)?;

    Ok(report_document(
        REPORT_TITLE,
        generated_at,
        html! {
            (basic_info_section(inspection))
            (details_section(inspection))
            @if let Some(photo) = photo {
                (photo_section(photo))
            }
            (status_section(&status))
        },
    ))
}

fn basic_info_section(inspection: &Inspection) -> Markup {
    let f = &inspection.fields;
    html! {
        section {
            h2 { "BASIC INFORMATION" }
            (field_table(("Field", "Value"), &[
                ("Platform", f.platform.clone()),
                ("Module", f.module.clone()),
                ("Sector", f.sector.clone()),
                ("Equipment Type", f.equipment_type.clone()),
                ("Tag", f.tag.clone()),
            ]))
        }
    }
}

fn details_section(inspection: &Inspection) -> Markup {
    let f = &inspection.fields;
    html! {
        section {
            h2 { "INSPECTION DETAILS" }
            (field_table(("Field", "Value"), &[
                ("Last Inspection Date", f.last_inspection_date.clone()),
                ("Current Inspection Date", f.inspection_date.clone()),
                ("Damage Type", f.damage_type.clone()),
                ("Defect Found", f.defect.clone()),
                ("Defect Cause", f.cause.clone()),
                ("Damage Category", f.damage_category.clone()),
                ("Recommendation", f.recommendation.clone()),
            ]))
            @if !f.notes.trim().is_empty() {
                h3 { "NOTES:" }
                p { (f.notes) }
            }
        }
    }
}

fn photo_section(photo: &EmbeddedPhoto) -> Markup {
    html! {
        section {
            h2 { "INSPECTION PHOTO" }
            img class="inspection-photo" src=(photo.data_uri) alt="Inspection photo";
            p class="small" { "File: " (photo.file_name) }
        }
    }
}

fn status_section(status: &InspectionStatus) -> Markup {
    html! {
        section {
            h2 { "STATUS AND RECOMMENDATIONS" }
            (field_table(("Status", "Description"), &[
                ("Last Inspection", status.last_display()),
                ("Next Inspection", status.next_due_display()),
                ("Days Until Due", status.days_until_due.to_string()),
                ("Message", status.message.clone()),
            ]))
        }
    }
}
