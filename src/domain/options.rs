// src/domain/options.rs

//! Choice lists offered by the inspection entry form.

pub const PLATFORMS: &[&str] = &["P-1", "P-2", "P-3", "P-4"];

pub const MODULES: &[&str] = &[
    "M01", "M02", "M03", "M04", "M05", "M06", "M07", "M08", "M09", "M10",
];

pub const SECTORS: &[&str] = &["S01", "S02", "S03"];

/// Equipment types with their tag prefix and number of tagged units.
pub const EQUIPMENT_TYPES: &[(&str, &str, u32)] = &[
    ("Pressure Vessel", "VP", 50),
    ("Tank", "TQ", 40),
    ("Heat Exchanger", "PM", 30),
    ("Filter", "FT", 100),
];

pub const DEFECTS: &[&str] = &[
    "Wall thickness reduction",
    "Leak",
    "Crack",
    "Abnormal wear",
    "Other",
];

pub const CAUSES: &[&str] = &[
    "External corrosion",
    "Internal corrosion",
    "Excessive vibration",
    "Impact",
    "Other",
];

pub const DAMAGE_CATEGORIES: &[&str] = &["I", "II", "III", "IV"];

pub const RECOMMENDATIONS: &[&str] = &[
    "Repair immediately",
    "Extend execution deadline",
    "Stop operation",
    "Painting",
    "Other",
];

pub const DAMAGE_TYPES: &[&str] = &["Localized", "Scattered", "Generalized"];

pub fn equipment_type_names() -> Vec<&'static str> {
    EQUIPMENT_TYPES.iter().map(|(name, _, _)| *name).collect()
}

/// Tags available for an equipment type, e.g. `TQ-001` .. `TQ-040` for tanks.
/// Unknown types have no tags.
pub fn tags_for(equipment_type: &str) -> Vec<String> {
    EQUIPMENT_TYPES
        .iter()
        .find(|(name, _, _)| *name == equipment_type)
        .map(|(_, prefix, count)| (1..=*count).map(|n| format!("{prefix}-{n:03}")).collect())
        .unwrap_or_default()
}
