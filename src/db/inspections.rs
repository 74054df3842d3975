use crate::db::connection::Database;
use crate::domain::changes::ChangeLogEntry;
use crate::domain::dates::{format_date, parse_date};
use crate::domain::inspection::{FieldChange, Inspection, InspectionFields};
use crate::errors::AppError;
use crate::photos::{remove_photo_file, PhotoStore};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_INSPECTION: &str = r#"
    SELECT
        id, platform, module, sector, equipment_type, tag, defect, cause,
        damage_category, recommendation, last_inspection_date, inspection_date,
        damage_type, notes, photo_path, created_at, updated_at
    FROM inspections
"#;

const NEWEST_FIRST: &str = "ORDER BY inspection_date DESC, created_at DESC, id DESC";

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn row_to_inspection(row: &Row<'_>) -> rusqlite::Result<Inspection> {
    Ok(Inspection {
        id: row.get(0)?,
        fields: InspectionFields {
            platform: row.get(1)?,
            module: row.get(2)?,
            sector: row.get(3)?,
            equipment_type: row.get(4)?,
            tag: row.get(5)?,
            defect: row.get(6)?,
            cause: row.get(7)?,
            damage_category: row.get(8)?,
            recommendation: row.get(9)?,
            last_inspection_date: row.get(10)?,
            inspection_date: row.get(11)?,
            damage_type: row.get(12)?,
            notes: row.get(13)?,
            photo_path: row.get(14)?,
        },
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}

fn query_inspections(
    conn: &Connection,
    filter: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Inspection>, AppError> {
    let sql = format!("{SELECT_INSPECTION} {filter} {NEWEST_FIRST}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, row_to_inspection)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn find_inspection(conn: &Connection, id: i64) -> Result<Option<Inspection>, AppError> {
    let sql = format!("{SELECT_INSPECTION} WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_inspection)
        .optional()
        .map_err(AppError::from)
}

/// Validates and stores a new inspection, returning its id.
pub fn create_inspection(db: &Database, fields: &InspectionFields) -> Result<i64, AppError> {
    fields.validate()?;

    let id = db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let now = now();
        tx.execute(
            r#"
            INSERT INTO inspections (
                platform, module, sector, equipment_type, tag, defect, cause,
                damage_category, recommendation, last_inspection_date, inspection_date,
                damage_type, notes, photo_path, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                &fields.platform,
                &fields.module,
                &fields.sector,
                &fields.equipment_type,
                &fields.tag,
                &fields.defect,
                &fields.cause,
                &fields.damage_category,
                &fields.recommendation,
                &fields.last_inspection_date,
                &fields.inspection_date,
                &fields.damage_type,
                &fields.notes,
                &fields.photo_path,
                now,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    })?;

    tracing::info!(inspection_id = id, tag = %fields.tag, "Inspection saved");
    Ok(id)
}

pub fn get_inspection(db: &Database, id: i64) -> Result<Option<Inspection>, AppError> {
    db.with_conn(|conn| find_inspection(conn, id))
}

/// All inspections, newest inspection date first.
pub fn list_inspections(db: &Database) -> Result<Vec<Inspection>, AppError> {
    db.with_conn(|conn| query_inspections(conn, "", []))
}

/// Inspections whose inspection date falls within `start..=end`.
pub fn list_inspections_between(
    db: &Database,
    start: &str,
    end: &str,
) -> Result<Vec<Inspection>, AppError> {
    // Normalise both bounds so the text comparison in SQL is a date comparison.
    let start = format_date(parse_date(start)?);
    let end = format_date(parse_date(end)?);

    db.with_conn(|conn| {
        query_inspections(
            conn,
            "WHERE inspection_date BETWEEN ?1 AND ?2",
            params![start, end],
        )
    })
}

pub fn list_inspections_by_equipment(
    db: &Database,
    equipment_type: &str,
) -> Result<Vec<Inspection>, AppError> {
    db.with_conn(|conn| {
        query_inspections(conn, "WHERE equipment_type = ?1", params![equipment_type])
    })
}

/// Replaces the fields of an existing inspection and records one change-log
/// row per differing field. Returns `false` when the id is unknown.
pub fn update_inspection(
    db: &Database,
    id: i64,
    fields: &InspectionFields,
) -> Result<bool, AppError> {
    fields.validate()?;

    let changes = db.with_conn(|conn| {
        let tx = conn.transaction()?;

        let Some(current) = find_inspection(&tx, id)? else {
            return Ok(None);
        };

        let changes = current.fields.diff(fields);
        let now = now();

        tx.execute(
            r#"
            UPDATE inspections SET
                platform = ?1, module = ?2, sector = ?3, equipment_type = ?4,
                tag = ?5, defect = ?6, cause = ?7, damage_category = ?8,
                recommendation = ?9, last_inspection_date = ?10, inspection_date = ?11,
                damage_type = ?12, notes = ?13, photo_path = ?14, updated_at = ?15
            WHERE id = ?16
            "#,
            params![
                &fields.platform,
                &fields.module,
                &fields.sector,
                &fields.equipment_type,
                &fields.tag,
                &fields.defect,
                &fields.cause,
                &fields.damage_category,
                &fields.recommendation,
                &fields.last_inspection_date,
                &fields.inspection_date,
                &fields.damage_type,
                &fields.notes,
                &fields.photo_path,
                now,
                id,
            ],
        )?;
        log_changes(&tx, id, &changes, now)?;

        tx.commit()?;
        Ok(Some(changes.len()))
    })?;

    match changes {
        Some(n) => {
            tracing::info!(inspection_id = id, changed_fields = n, "Inspection updated");
            Ok(true)
        }
        None => {
            tracing::warn!(inspection_id = id, "Update skipped, inspection not found");
            Ok(false)
        }
    }
}

/// Inserts a batch of changes into the `inspection_changes` table.
fn log_changes(
    tx: &Connection,
    inspection_id: i64,
    changes: &[FieldChange],
    now: NaiveDateTime,
) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO inspection_changes (inspection_id, field_name, previous_value, new_value, changed_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;
    for change in changes {
        stmt.execute(params![
            inspection_id,
            change.field_name,
            &change.previous_value,
            &change.current_value,
            now,
        ])?;
    }
    Ok(())
}

/// Change-log rows of one inspection, oldest first.
pub fn list_changes(db: &Database, inspection_id: i64) -> Result<Vec<ChangeLogEntry>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, inspection_id, field_name, previous_value, new_value, changed_at
            FROM inspection_changes
            WHERE inspection_id = ?1
            ORDER BY id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![inspection_id], |row| {
            Ok(ChangeLogEntry {
                id: row.get(0)?,
                inspection_id: row.get(1)?,
                field_name: row.get(2)?,
                previous_value: row.get(3)?,
                new_value: row.get(4)?,
                changed_at: row.get(5)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

/// Deletes one inspection and its change log, then removes its photo file on
/// a best-effort basis. Returns `false` when the id is unknown.
pub fn delete_inspection(db: &Database, id: i64) -> Result<bool, AppError> {
    let deleted = db.with_conn(|conn| {
        let tx = conn.transaction()?;

        let photo: Option<Option<String>> = tx
            .query_row(
                "SELECT photo_path FROM inspections WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(photo) = photo else {
            return Ok(None);
        };

        tx.execute("DELETE FROM inspections WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(Some(photo))
    })?;

    match deleted {
        Some(photo) => {
            if let Some(path) = photo.filter(|p| !p.is_empty()) {
                remove_photo_file(&path);
            }
            tracing::info!(inspection_id = id, "Inspection deleted");
            Ok(true)
        }
        None => {
            tracing::warn!(inspection_id = id, "Delete skipped, inspection not found");
            Ok(false)
        }
    }
}

/// Removes every inspection, the whole change log, and every stored photo.
/// Individual file removal failures are logged and skipped.
pub fn clear_inspections(db: &Database, photos: &PhotoStore) -> Result<bool, AppError> {
    let photo_paths = db.with_conn(|conn| {
        let tx = conn.transaction()?;

        let paths = {
            let mut stmt = tx.prepare(
                "SELECT photo_path FROM inspections WHERE photo_path IS NOT NULL AND photo_path != ''",
            )?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            out
        };

        tx.execute("DELETE FROM inspection_changes", [])?;
        let removed = tx.execute("DELETE FROM inspections", [])?;
        tx.commit()?;

        tracing::info!(removed, "All inspections cleared");
        Ok(paths)
    })?;

    for path in &photo_paths {
        remove_photo_file(path);
    }
    let swept = photos.purge_all();
    tracing::debug!(referenced = photo_paths.len(), swept, "Photo directory purged");

    Ok(true)
}
