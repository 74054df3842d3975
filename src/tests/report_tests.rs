use crate::db::inspections::{create_inspection, get_inspection, list_inspections};
use crate::domain::inspection::Inspection;
use crate::reports::{load_photo, summarize};
use crate::spreadsheets::export_inspections_xlsx;
use crate::tests::utils::{days_ago, init_test_env, sample_fields, write_png, TestEnv};
use chrono::NaiveDate;
use std::fs;

fn stored(env: &TestEnv, fields: &crate::domain::inspection::InspectionFields) -> Inspection {
    let id = create_inspection(env.db(), fields).expect("create");
    get_inspection(env.db(), id).expect("get").expect("exists")
}

#[test]
fn single_report_contains_sections_and_status() {
    let env = init_test_env();
    let mut fields = sample_fields("TQ-007");
    fields.notes = "Flange bolts replaced".into();
    let inspection = stored(&env, &fields);

    let path = env.reports().generate_inspection_report(&inspection).expect("report");
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with(&format!("inspection_report_TQ-007_{}_", inspection.id)));
    assert!(name.ends_with(".html"));

    let html = fs::read_to_string(&path).expect("read report");
    assert!(html.contains("EQUIPMENT INSPECTION REPORT"));
    assert!(html.contains("BASIC INFORMATION"));
    assert!(html.contains("TQ-007"));
    assert!(html.contains("Flange bolts replaced"));
    assert!(html.contains("STATUS AND RECOMMENDATIONS"));
    assert!(html.contains("Equipment Inspection System"));
    assert!(!html.contains("INSPECTION PHOTO"));
}

#[test]
fn report_embeds_existing_photo() {
    let env = init_test_env();
    let source = env.scratch("photo.png");
    write_png(&source, 40, 30);
    let photo = env.photos().ingest(&source).expect("ingest");

    let mut fields = sample_fields("TQ-008");
    fields.photo_path = Some(photo.to_string_lossy().into_owned());
    let inspection = stored(&env, &fields);

    let path = env.reports().generate_inspection_report(&inspection).expect("report");
    let html = fs::read_to_string(path).expect("read");
    assert!(html.contains("INSPECTION PHOTO"));
    assert!(html.contains("data:image/jpeg;base64,"));
}

#[test]
fn missing_photo_file_skips_photo_block() {
    let env = init_test_env();
    let mut fields = sample_fields("TQ-009");
    fields.photo_path = Some(env.scratch("vanished.jpg").to_string_lossy().into_owned());
    let inspection = stored(&env, &fields);

    assert!(load_photo(inspection.fields.photo_path.as_deref())
        .expect("load")
        .is_none());
    let path = env.reports().generate_inspection_report(&inspection).expect("report");
    assert!(!fs::read_to_string(path).expect("read").contains("INSPECTION PHOTO"));
}

#[test]
fn batch_reports_skip_failing_record() {
    let env = init_test_env();
    for n in 1..=3 {
        create_inspection(env.db(), &sample_fields(&format!("TQ-10{n}"))).expect("create");
    }

    let garbage = env.scratch("corrupt.jpg");
    fs::write(&garbage, b"\x00\x01 not an image").expect("write");
    let mut bad = sample_fields("TQ-199");
    bad.photo_path = Some(garbage.to_string_lossy().into_owned());
    let bad_id = create_inspection(env.db(), &bad).expect("create");

    let inspections = list_inspections(env.db()).expect("list");
    let outcome = env.reports().generate_batch_reports(&inspections);

    assert_eq!(outcome.total, 4);
    assert_eq!(outcome.succeeded(), 3);
    assert_eq!(outcome.failed(), 1);
    assert_eq!(outcome.failures[0].0, bad_id);
    assert!(outcome.generated.iter().all(|p| p.exists()));
}

#[test]
fn batch_of_nothing_generates_nothing() {
    let env = init_test_env();
    let outcome = env.reports().generate_batch_reports(&[]);
    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.succeeded(), 0);
}

#[test]
fn summary_counts_overdue_and_groups() {
    let env = init_test_env();

    let mut overdue = sample_fields("TQ-001");
    overdue.last_inspection_date = days_ago(400);
    create_inspection(env.db(), &overdue).expect("create");

    let mut vessel = sample_fields("VP-001");
    vessel.equipment_type = "Pressure Vessel".into();
    vessel.platform = "P-2".into();
    create_inspection(env.db(), &vessel).expect("create");

    create_inspection(env.db(), &sample_fields("TQ-002")).expect("create");

    let inspections = list_inspections(env.db()).expect("list");
    let stats = summarize(&inspections, 12, crate::domain::status::today());
    assert_eq!(stats.total, 3);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.on_time, 2);
    assert_eq!(stats.by_equipment_type.get("Tank"), Some(&2));
    assert_eq!(stats.by_platform.get("P-2"), Some(&1));

    let path = env.reports().generate_summary_report(&inspections).expect("summary");
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("inspection_summary_"));
    let html = fs::read_to_string(path).expect("read");
    assert!(html.contains("INSPECTION SUMMARY REPORT"));
    assert!(html.contains("OVERALL STATISTICS"));
    assert!(html.contains("Pressure Vessel"));
}

#[test]
fn summary_of_empty_store_is_all_zero() {
    let stats = summarize(&[], 12, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!((stats.total, stats.overdue, stats.on_time), (0, 0, 0));
    assert!(stats.by_platform.is_empty());
}

#[test]
fn spreadsheet_export_is_a_zip_workbook() {
    let env = init_test_env();
    create_inspection(env.db(), &sample_fields("TQ-001")).expect("create");
    let inspections = list_inspections(env.db()).expect("list");

    let bytes = export_inspections_xlsx(&inspections, 12, crate::domain::status::today())
        .expect("export");
    assert!(bytes.starts_with(b"PK"));
}
