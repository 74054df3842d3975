use crate::db::inspections::{
    clear_inspections, create_inspection, delete_inspection, get_inspection, list_changes,
    list_inspections, list_inspections_between, list_inspections_by_equipment, update_inspection,
};
use crate::errors::AppError;
use crate::tests::utils::{days_ago, init_test_env, sample_fields, write_png};
use rusqlite::params;

fn count(env: &crate::tests::utils::TestEnv, table: &str) -> i64 {
    env.db()
        .with_conn(|conn| {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
        })
        .expect("count query")
}

#[test]
fn create_then_get_returns_same_fields() {
    let env = init_test_env();
    let mut fields = sample_fields("TQ-001");
    fields.notes = "  spaced notes ".into();

    let id = create_inspection(env.db(), &fields).expect("create");
    let stored = get_inspection(env.db(), id).expect("get").expect("exists");

    assert_eq!(stored.id, id);
    assert_eq!(stored.fields, fields);
    assert_eq!(stored.created_at, stored.updated_at);
}

#[test]
fn create_rejects_missing_required_field_without_inserting() {
    let env = init_test_env();
    let mut fields = sample_fields("TQ-001");
    fields.cause = "   ".into();

    let err = create_inspection(env.db(), &fields).unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Cause is required"),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(count(&env, "inspections"), 0);
}

#[test]
fn create_rejects_malformed_date() {
    let env = init_test_env();
    let mut fields = sample_fields("TQ-001");
    fields.last_inspection_date = "15/03/2024".into();

    assert!(matches!(
        create_inspection(env.db(), &fields),
        Err(AppError::Validation(_))
    ));
    assert_eq!(count(&env, "inspections"), 0);
}

#[test]
fn get_unknown_id_is_none() {
    let env = init_test_env();
    assert!(get_inspection(env.db(), 999).expect("get").is_none());
}

#[test]
fn update_logs_one_row_per_changed_field() {
    let env = init_test_env();
    let original = sample_fields("TQ-001");
    let id = create_inspection(env.db(), &original).expect("create");

    let mut edited = original.clone();
    edited.defect = "Crack".into();
    edited.damage_category = "IV".into();
    edited.notes = "re-checked".into();

    assert!(update_inspection(env.db(), id, &edited).expect("update"));

    let changes = list_changes(env.db(), id).expect("changes");
    let fields: Vec<&str> = changes.iter().map(|c| c.field_name.as_str()).collect();
    assert_eq!(fields, vec!["defect", "damage_category", "notes"]);

    let defect = &changes[0];
    assert_eq!(defect.previous_value.as_deref(), Some("Leak"));
    assert_eq!(defect.new_value.as_deref(), Some("Crack"));

    let stored = get_inspection(env.db(), id).expect("get").expect("exists");
    assert_eq!(stored.fields, edited);
    assert!(stored.updated_at >= stored.created_at);
}

#[test]
fn update_with_identical_values_logs_nothing() {
    let env = init_test_env();
    let fields = sample_fields("TQ-002");
    let id = create_inspection(env.db(), &fields).expect("create");

    assert!(update_inspection(env.db(), id, &fields).expect("update"));
    assert!(list_changes(env.db(), id).expect("changes").is_empty());
}

#[test]
fn update_treats_missing_and_empty_photo_alike() {
    let env = init_test_env();
    let fields = sample_fields("TQ-003");
    let id = create_inspection(env.db(), &fields).expect("create");

    let mut same = fields.clone();
    same.photo_path = Some(String::new());
    assert!(update_inspection(env.db(), id, &same).expect("update"));
    assert!(list_changes(env.db(), id).expect("changes").is_empty());
}

#[test]
fn update_unknown_id_returns_false() {
    let env = init_test_env();
    assert!(!update_inspection(env.db(), 42, &sample_fields("TQ-001")).expect("update"));
    assert_eq!(count(&env, "inspection_changes"), 0);
}

#[test]
fn update_with_invalid_fields_changes_nothing() {
    let env = init_test_env();
    let fields = sample_fields("TQ-001");
    let id = create_inspection(env.db(), &fields).expect("create");

    let mut broken = fields.clone();
    broken.tag = String::new();
    assert!(update_inspection(env.db(), id, &broken).is_err());

    let stored = get_inspection(env.db(), id).expect("get").expect("exists");
    assert_eq!(stored.fields.tag, "TQ-001");
    assert_eq!(count(&env, "inspection_changes"), 0);
}

#[test]
fn delete_removes_record_history_and_photo() {
    let env = init_test_env();
    let source = env.scratch("valve.png");
    write_png(&source, 64, 48);
    let stored_photo = env.photos().ingest(&source).expect("ingest");

    let mut fields = sample_fields("TQ-004");
    fields.photo_path = Some(stored_photo.to_string_lossy().into_owned());
    let id = create_inspection(env.db(), &fields).expect("create");

    let mut edited = fields.clone();
    edited.defect = "Crack".into();
    update_inspection(env.db(), id, &edited).expect("update");
    assert_eq!(count(&env, "inspection_changes"), 1);

    assert!(delete_inspection(env.db(), id).expect("delete"));
    assert!(get_inspection(env.db(), id).expect("get").is_none());
    assert_eq!(count(&env, "inspection_changes"), 0);
    assert!(!stored_photo.exists());
}

#[test]
fn delete_succeeds_when_photo_already_gone() {
    let env = init_test_env();
    let mut fields = sample_fields("TQ-005");
    fields.photo_path = Some(env.scratch("gone.jpg").to_string_lossy().into_owned());
    let id = create_inspection(env.db(), &fields).expect("create");

    assert!(delete_inspection(env.db(), id).expect("delete"));
    assert_eq!(count(&env, "inspections"), 0);
}

#[test]
fn delete_unknown_id_returns_false() {
    let env = init_test_env();
    create_inspection(env.db(), &sample_fields("TQ-001")).expect("create");

    assert!(!delete_inspection(env.db(), 999).expect("delete"));
    assert_eq!(count(&env, "inspections"), 1);
}

#[test]
fn clear_removes_everything_even_with_missing_photo() {
    let env = init_test_env();

    let mut ids = Vec::new();
    let mut stored = Vec::new();
    for n in 0..3 {
        let source = env.scratch(&format!("p{n}.png"));
        write_png(&source, 20, 20);
        let photo = env.photos().ingest(&source).expect("ingest");

        let mut fields = sample_fields(&format!("TQ-01{n}"));
        fields.photo_path = Some(photo.to_string_lossy().into_owned());
        ids.push(create_inspection(env.db(), &fields).expect("create"));
        stored.push(photo);
    }

    let mut edited = get_inspection(env.db(), ids[0]).expect("get").expect("exists").fields;
    edited.notes = "edited".into();
    update_inspection(env.db(), ids[0], &edited).expect("update");

    // One photo removed behind the store's back.
    std::fs::remove_file(&stored[1]).expect("remove");

    assert!(clear_inspections(env.db(), env.photos()).expect("clear"));
    assert_eq!(count(&env, "inspections"), 0);
    assert_eq!(count(&env, "inspection_changes"), 0);
    assert!(env.photos().list_photos().expect("list").is_empty());
}

#[test]
fn list_orders_by_inspection_date_newest_first() {
    let env = init_test_env();

    let mut older = sample_fields("TQ-001");
    older.inspection_date = days_ago(20);
    let mut newer = sample_fields("TQ-002");
    newer.inspection_date = days_ago(2);
    let mut same_day = sample_fields("TQ-003");
    same_day.inspection_date = days_ago(2);

    create_inspection(env.db(), &older).expect("create");
    create_inspection(env.db(), &newer).expect("create");
    create_inspection(env.db(), &same_day).expect("create");

    let tags: Vec<String> = list_inspections(env.db())
        .expect("list")
        .into_iter()
        .map(|i| i.fields.tag)
        .collect();
    assert_eq!(tags, vec!["TQ-003", "TQ-002", "TQ-001"]);
}

#[test]
fn range_query_is_inclusive() {
    let env = init_test_env();
    for (tag, date) in [
        ("TQ-001", "2024-01-01"),
        ("TQ-002", "2024-01-15"),
        ("TQ-003", "2024-01-31"),
        ("TQ-004", "2024-02-01"),
    ] {
        let mut f = sample_fields(tag);
        f.inspection_date = date.into();
        create_inspection(env.db(), &f).expect("create");
    }

    let found = list_inspections_between(env.db(), "2024-01-01", "2024-01-31").expect("range");
    let mut tags: Vec<String> = found.into_iter().map(|i| i.fields.tag).collect();
    tags.sort();
    assert_eq!(tags, vec!["TQ-001", "TQ-002", "TQ-003"]);

    assert!(list_inspections_between(env.db(), "January", "2024-01-31").is_err());
}

#[test]
fn equipment_query_matches_exact_type() {
    let env = init_test_env();
    create_inspection(env.db(), &sample_fields("TQ-001")).expect("create");

    let mut vessel = sample_fields("VP-001");
    vessel.equipment_type = "Pressure Vessel".into();
    create_inspection(env.db(), &vessel).expect("create");

    let tanks = list_inspections_by_equipment(env.db(), "Tank").expect("query");
    assert_eq!(tanks.len(), 1);
    assert_eq!(tanks[0].fields.tag, "TQ-001");
    assert!(list_inspections_by_equipment(env.db(), "Filter")
        .expect("query")
        .is_empty());
}

#[test]
fn change_log_cascades_with_raw_delete() {
    let env = init_test_env();
    let fields = sample_fields("TQ-001");
    let id = create_inspection(env.db(), &fields).expect("create");
    let mut edited = fields.clone();
    edited.sector = "S02".into();
    update_inspection(env.db(), id, &edited).expect("update");

    env.db()
        .with_conn(|conn| {
            conn.execute("DELETE FROM inspections WHERE id = ?1", params![id])?;
            Ok(())
        })
        .expect("raw delete");

    assert_eq!(count(&env, "inspection_changes"), 0);
}

#[test]
fn unpadded_dates_are_rejected_so_range_queries_stay_exact() {
    let env = init_test_env();

    for bad in ["2024-3-5", "2024-03-5", "+2024-03-05"] {
        let mut f = sample_fields("TQ-080");
        f.inspection_date = bad.into();
        let err = create_inspection(env.db(), &f).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{bad} was accepted");
    }
    assert_eq!(count(&env, "inspections"), 0);

    let mut good = sample_fields("TQ-080");
    good.inspection_date = "2024-03-05".into();
    let id = create_inspection(env.db(), &good).expect("create");

    let mut edited = good.clone();
    edited.last_inspection_date = "2023-6-1".into();
    assert!(update_inspection(env.db(), id, &edited).is_err());

    let found = list_inspections_between(env.db(), "2024-03-01", "2024-03-31").expect("range");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].fields.inspection_date, "2024-03-05");
}
