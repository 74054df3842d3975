// src/domain/changes.rs

use chrono::NaiveDateTime;

/// One row of the append-only audit trail kept for each inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLogEntry {
    pub id: i64,
    pub inspection_id: i64,
    /// Column name of the edited field, e.g. `tag` or `photo_path`.
    pub field_name: String,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_at: NaiveDateTime,
}
