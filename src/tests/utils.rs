use crate::config::UiConfig;
use crate::db::connection::{init_db, Database};
use crate::domain::dates::format_date;
use crate::domain::inspection::InspectionFields;
use crate::domain::status::today;
use crate::photos::PhotoStore;
use crate::reports::ReportGenerator;
use crate::router::AppState;
use chrono::Duration;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated application state rooted in a temporary directory. The directory
/// and everything in it goes away when this is dropped.
pub struct TestEnv {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestEnv {
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.state.photos
    }

    pub fn reports(&self) -> &ReportGenerator {
        &self.state.reports
    }

    /// A path inside the temp dir that is not managed by any store.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Fresh database, photo store and report directory using the real schema.
pub fn init_test_env() -> TestEnv {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("temp dir: {e}"));

    let db = Database::new(dir.path().join("test.sqlite3"));
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let photos = PhotoStore::new(dir.path().join("photos")).expect("photo store");
    let reports = ReportGenerator::new(dir.path().join("reports"), 12).expect("report generator");

    TestEnv {
        state: AppState {
            db,
            photos,
            reports,
            ui: UiConfig::default(),
        },
        dir,
    }
}

/// `n` days before today as `YYYY-MM-DD`.
pub fn days_ago(n: i64) -> String {
    format_date(today() - Duration::days(n))
}

/// A complete, valid record whose dates pass the submission checks today.
pub fn sample_fields(tag: &str) -> InspectionFields {
    InspectionFields {
        platform: "P-1".into(),
        module: "M01".into(),
        sector: "S01".into(),
        equipment_type: "Tank".into(),
        tag: tag.into(),
        defect: "Leak".into(),
        cause: "External corrosion".into(),
        damage_category: "II".into(),
        recommendation: "Painting".into(),
        last_inspection_date: days_ago(200),
        inspection_date: days_ago(1),
        damage_type: "Localized".into(),
        notes: String::new(),
        photo_path: None,
    }
}

/// Writes a small solid-colour PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]))
        .save(path)
        .unwrap_or_else(|e| panic!("write png {}: {e}", path.display()));
}
