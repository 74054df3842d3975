// src/domain/inspection.rs

use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::domain::dates::parse_date;
use crate::errors::AppError;

/// The editable part of an inspection record, exactly as the entry form
/// submits it. Dates are kept in their `YYYY-MM-DD` text form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionFields {
    pub platform: String,
    pub module: String,
    pub sector: String,
    pub equipment_type: String,
    pub tag: String,
    pub defect: String,
    pub cause: String,
    pub damage_category: String,
    pub recommendation: String,
    pub last_inspection_date: String,
    pub inspection_date: String,
    pub damage_type: String,
    pub notes: String,
    pub photo_path: Option<String>,
}

/// A stored inspection row.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub id: i64,
    pub fields: InspectionFields,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A single differing field between a stored record and its replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field_name: &'static str,
    pub previous_value: String,
    pub current_value: String,
}

/// Required columns with the label shown when one is missing.
pub const REQUIRED_FIELDS: [(&str, &str); 12] = [
    ("platform", "Platform"),
    ("module", "Module"),
    ("sector", "Sector"),
    ("equipment_type", "Equipment type"),
    ("tag", "Tag"),
    ("defect", "Defect"),
    ("cause", "Cause"),
    ("damage_category", "Damage category"),
    ("recommendation", "Recommendation"),
    ("last_inspection_date", "Last inspection date"),
    ("inspection_date", "Inspection date"),
    ("damage_type", "Damage type"),
];

impl InspectionFields {
    /// Textual value of a column, the representation used by the change log.
    pub fn value_of(&self, column: &str) -> Option<String> {
        let v = match column {
            "platform" => &self.platform,
            "module" => &self.module,
            "sector" => &self.sector,
            "equipment_type" => &self.equipment_type,
            "tag" => &self.tag,
            "defect" => &self.defect,
            "cause" => &self.cause,
            "damage_category" => &self.damage_category,
            "recommendation" => &self.recommendation,
            "last_inspection_date" => &self.last_inspection_date,
            "inspection_date" => &self.inspection_date,
            "damage_type" => &self.damage_type,
            "notes" => &self.notes,
            "photo_path" => return Some(self.photo_path.clone().unwrap_or_default()),
            _ => return None,
        };
        Some(v.clone())
    }

    /// Rejects a field set with any required value blank or a date that is
    /// not `YYYY-MM-DD`. Notes and photo are optional.
    pub fn validate(&self) -> Result<(), AppError> {
        for (column, label) in REQUIRED_FIELDS {
            let blank = self
                .value_of(column)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true);
            if blank {
                return Err(AppError::Validation(format!("{label} is required")));
            }
        }

        parse_date(&self.last_inspection_date)?;
        parse_date(&self.inspection_date)?;
        Ok(())
    }

    /// Builds a field set from decoded form pairs. Unknown keys are ignored,
    /// absent keys become empty strings, and an empty photo becomes `None`.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let get = |key: &str| form.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        let photo = get("photo_path");

        Self {
            platform: get("platform"),
            module: get("module"),
            sector: get("sector"),
            equipment_type: get("equipment_type"),
            tag: get("tag"),
            defect: get("defect"),
            cause: get("cause"),
            damage_category: get("damage_category"),
            recommendation: get("recommendation"),
            last_inspection_date: get("last_inspection_date"),
            inspection_date: get("inspection_date"),
            damage_type: get("damage_type"),
            notes: form.get("notes").cloned().unwrap_or_default(),
            photo_path: if photo.is_empty() { None } else { Some(photo) },
        }
    }

    /// Compares two field sets by their textual representation and returns
    /// one entry per differing column.
    pub fn diff(&self, new: &InspectionFields) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        macro_rules! compare_and_log {
            ($field:ident) => {
                let previous = self.value_of(stringify!($field)).unwrap_or_default();
                let current = new.value_of(stringify!($field)).unwrap_or_default();
                if previous != current {
                    changes.push(FieldChange {
                        field_name: stringify!($field),
                        previous_value: previous,
                        current_value: current,
                    });
                }
            };
        }

        compare_and_log!(platform);
        compare_and_log!(module);
        compare_and_log!(sector);
        compare_and_log!(equipment_type);
        compare_and_log!(tag);
        compare_and_log!(defect);
        compare_and_log!(cause);
        compare_and_log!(damage_category);
        compare_and_log!(recommendation);
        compare_and_log!(last_inspection_date);
        compare_and_log!(inspection_date);
        compare_and_log!(damage_type);
        compare_and_log!(notes);
        compare_and_log!(photo_path);

        changes
    }
}
