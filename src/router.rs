use crate::config::UiConfig;
use crate::db::connection::Database;
use crate::db::inspections::{
    clear_inspections, create_inspection, delete_inspection, get_inspection, list_changes,
    list_inspections, list_inspections_between, list_inspections_by_equipment, update_inspection,
};
use crate::domain::dates::{
    format_relative, parse_date, validate_date_range, validate_inspection_date,
    validate_last_inspection_date,
};
use crate::domain::inspection::{Inspection, InspectionFields};
use crate::domain::options::equipment_type_names;
use crate::domain::status::{inspection_status, today, StatusClass};
use crate::errors::AppError;
use crate::photos::{remove_photo_file, PhotoStore};
use crate::reports::ReportGenerator;
use crate::responses::{
    html_response, json_response, redirect, static_asset, xlsx_response, ResultResp,
};
use crate::spreadsheets::export_inspections_xlsx;
use crate::templates::pages::{
    batch_result_page, inspection_detail_page, inspection_form_page, inspections_page,
    reports_page, summary_result_page, tag_options, DetailVm, InspectionListVm, InspectionRow,
};
use astra::Request;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything a request handler needs. Built once in `main` and shared by
/// every worker thread.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub photos: PhotoStore,
    pub reports: ReportGenerator,
    pub ui: UiConfig,
}

impl AppState {
    fn validity_months(&self) -> u32 {
        self.reports.validity_months()
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    tracing::debug!(%method, %path, "Request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => list(state, &query),

        ("GET", ["inspections", "new"]) => html_response(inspection_form_page(
            &state.ui,
            "New inspection",
            "/inspections",
            &InspectionFields::default(),
        )),
        ("POST", ["inspections"]) => create(state, &read_form(req)?),
        ("POST", ["inspections", "clear"]) => {
            clear_inspections(&state.db, &state.photos)?;
            redirect("/")
        }
        ("GET", ["inspections", id]) => detail(state, parse_id(id)?),
        ("POST", ["inspections", id]) => {
            let id = parse_id(id)?;
            update(state, id, &read_form(req)?)
        }
        ("POST", ["inspections", id, "delete"]) => {
            if !delete_inspection(&state.db, parse_id(id)?)? {
                return Err(AppError::NotFound(format!("inspection {id}")));
            }
            redirect("/")
        }
        ("POST", ["inspections", id, "report"]) => {
            let inspection = find(state, parse_id(id)?)?;
            let written = state.reports.generate_inspection_report(&inspection)?;
            let message = format!("Report written to {}", written.display());
            html_response(reports_page(&state.ui, state.reports.output_dir(), Some(&message)))
        }
        ("GET", ["inspections", id, "status.json"]) => {
            let inspection = find(state, parse_id(id)?)?;
            let status = inspection_status(
                &inspection.fields.last_inspection_date,
                state.validity_months(),
                today(),
            )?;
            json_response(&status)
        }

        ("GET", ["static", name]) => static_asset(name),

        ("GET", ["tags"]) => {
            let equipment_type = query.get("equipment_type").map(String::as_str).unwrap_or("");
            html_response(tag_options(equipment_type, ""))
        }

        ("GET", ["reports"]) => {
            html_response(reports_page(&state.ui, state.reports.output_dir(), None))
        }
        ("POST", ["reports", "batch"]) => {
            let inspections = list_inspections(&state.db)?;
            let outcome = state.reports.generate_batch_reports(&inspections);
            html_response(batch_result_page(&state.ui, &outcome))
        }
        ("POST", ["reports", "summary"]) => {
            let inspections = list_inspections(&state.db)?;
            let written = state.reports.generate_summary_report(&inspections)?;
            html_response(summary_result_page(&state.ui, &written, inspections.len()))
        }
        ("GET", ["reports", "summary.xlsx"]) => {
            let inspections = list_inspections(&state.db)?;
            let buffer = export_inspections_xlsx(&inspections, state.validity_months(), today())?;
            xlsx_response(buffer, "inspections.xlsx")
        }

        ("POST", ["photos", "cleanup"]) => {
            let referenced: HashSet<PathBuf> = list_inspections(&state.db)?
                .into_iter()
                .filter_map(|i| i.fields.photo_path.map(PathBuf::from))
                .collect();
            let removed = state.photos.cleanup_orphans(&referenced)?;
            let message = format!("Removed {removed} unreferenced photos.");
            html_response(reports_page(&state.ui, state.reports.output_dir(), Some(&message)))
        }

        _ => Err(AppError::NotFound(path.clone())),
    }
}

fn list(state: &AppState, query: &HashMap<String, String>) -> ResultResp {
    let param = |key: &str| query.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
    let equipment_type = param("equipment_type");
    let start = param("start");
    let end = param("end");

    let inspections = if !start.is_empty() || !end.is_empty() {
        validate_date_range(&start, &end)?;
        let mut found = list_inspections_between(&state.db, &start, &end)?;
        if !equipment_type.is_empty() {
            found.retain(|i| i.fields.equipment_type == equipment_type);
        }
        found
    } else if !equipment_type.is_empty() {
        list_inspections_by_equipment(&state.db, &equipment_type)?
    } else {
        list_inspections(&state.db)?
    };

    let now = today();
    let rows = inspections
        .into_iter()
        .map(|inspection| {
            let (status_class, status_message) = match inspection_status(
                &inspection.fields.last_inspection_date,
                state.validity_months(),
                now,
            ) {
                Ok(s) => (s.status, s.message),
                Err(_) => (StatusClass::Unknown, "Invalid date".to_string()),
            };
            let inspected = parse_date(&inspection.fields.inspection_date)
                .map(|d| format_relative(d, now))
                .unwrap_or_default();
            InspectionRow {
                inspection,
                status_class,
                status_message,
                inspected,
            }
        })
        .collect();

    let vm = InspectionListVm {
        rows,
        equipment_types: equipment_type_names(),
        equipment_type,
        start,
        end,
    };
    html_response(inspections_page(&state.ui, &vm))
}

fn detail(state: &AppState, id: i64) -> ResultResp {
    let inspection = find(state, id)?;
    let status = inspection_status(
        &inspection.fields.last_inspection_date,
        state.validity_months(),
        today(),
    )
    .map_err(|e| e.to_string());
    let changes = list_changes(&state.db, id)?;

    let vm = DetailVm {
        inspection,
        status,
        changes,
    };
    html_response(inspection_detail_page(&state.ui, &vm))
}

fn create(state: &AppState, form: &HashMap<String, String>) -> ResultResp {
    let mut fields = InspectionFields::from_form(form);
    fields.validate()?;
    let now = today();
    validate_inspection_date(&fields.inspection_date, now)?;
    validate_last_inspection_date(&fields.last_inspection_date, now)?;

    let ingested = match fields.photo_path.as_deref() {
        Some(source) => Some(state.photos.ingest(Path::new(source))?),
        None => None,
    };
    fields.photo_path = ingested.as_ref().map(|p| p.to_string_lossy().into_owned());

    let id = match create_inspection(&state.db, &fields) {
        Ok(id) => id,
        Err(e) => {
            if let Some(p) = &ingested {
                remove_photo_file(p);
            }
            return Err(e);
        }
    };

    // The record stays saved even if its document cannot be rendered.
    let inspection = find(state, id)?;
    if let Err(e) = state.reports.generate_inspection_report(&inspection) {
        tracing::warn!(inspection_id = id, error = %e, "Report for new inspection failed");
    }

    redirect(&format!("/inspections/{id}"))
}

fn update(state: &AppState, id: i64, form: &HashMap<String, String>) -> ResultResp {
    let current = find(state, id)?;
    let mut fields = InspectionFields::from_form(form);
    fields.validate()?;

    // Submission windows apply to dates being entered, not to stored ones.
    let now = today();
    if fields.inspection_date != current.fields.inspection_date {
        validate_inspection_date(&fields.inspection_date, now)?;
    }
    if fields.last_inspection_date != current.fields.last_inspection_date {
        validate_last_inspection_date(&fields.last_inspection_date, now)?;
    }

    let photo_changed = fields.photo_path != current.fields.photo_path;
    let ingested = match fields.photo_path.as_deref() {
        Some(source) if photo_changed => Some(state.photos.ingest(Path::new(source))?),
        _ => None,
    };
    if let Some(p) = &ingested {
        fields.photo_path = Some(p.to_string_lossy().into_owned());
    }

    match update_inspection(&state.db, id, &fields) {
        Ok(true) => {}
        Ok(false) => {
            if let Some(p) = &ingested {
                remove_photo_file(p);
            }
            return Err(AppError::NotFound(format!("inspection {id}")));
        }
        Err(e) => {
            if let Some(p) = &ingested {
                remove_photo_file(p);
            }
            return Err(e);
        }
    }

    if photo_changed {
        if let Some(old) = &current.fields.photo_path {
            remove_photo_file(old);
        }
    }

    redirect(&format!("/inspections/{id}"))
}

fn find(state: &AppState, id: i64) -> Result<Inspection, AppError> {
    get_inspection(&state.db, id)?.ok_or_else(|| AppError::NotFound(format!("inspection {id}")))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid inspection id: {raw}")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_form(req: Request) -> Result<HashMap<String, String>, AppError> {
    let mut body = String::new();
    req.into_body()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| AppError::BadRequest(format!("unreadable form body: {e}")))?;
    Ok(url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect())
}
