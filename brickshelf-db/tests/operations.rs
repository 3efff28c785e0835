use brickshelf_catalog::types::*;
use brickshelf_db::*;
use chrono::NaiveDate;

fn falcon() -> NewRecord {
    NewRecord {
        set_number: "75192".to_string(),
        alternate_set_number: Some("75192-1".to_string()),
        title: "Millennium Falcon".to_string(),
        owned: true,
        quantity_owned: 1,
        release_year: Some(2017),
        description: Some("Ultimate Collector Series".to_string()),
        series: Some("Star Wars".to_string()),
        num_parts: 7541,
        num_minifigs: 8,
        bricklink_url: Some("https://www.bricklink.com/v2/catalog/catalogitem.page?S=75192-1".to_string()),
        rebrickable_url: Some("https://rebrickable.com/sets/75192-1/".to_string()),
        approximate_value: Some(849.99),
        value_last_updated: NaiveDate::from_ymd_opt(2024, 1, 15),
        condition_description: Some("Sealed".to_string()),
        image_filename: None,
        notes: Some("Birthday present".to_string()),
    }
}

#[test]
fn insert_and_find_by_id() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let found = find_record_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.set_number, "75192");
    assert_eq!(found.approximate_value, Some(849.99));
    assert_eq!(found.value_last_updated, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(found.condition_description.as_deref(), Some("Sealed"));
}

#[test]
fn insert_preserves_absent_optionals() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &NewRecord::new("10497", "Galaxy Explorer")).unwrap();
    let found = find_record_by_id(&conn, &created.id).unwrap().unwrap();

    assert_eq!(found.alternate_set_number, None);
    assert_eq!(found.release_year, None);
    assert_eq!(found.approximate_value, None);
    assert_eq!(found.value_last_updated, None);
    assert!(!found.owned);
    assert_eq!(found.quantity_owned, 0);
}

#[test]
fn identifiers_are_unique() {
    let conn = open_memory().unwrap();
    let a = insert_record(&conn, &NewRecord::new("1", "One")).unwrap();
    let b = insert_record(&conn, &NewRecord::new("2", "Two")).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn find_missing_returns_none() {
    let conn = open_memory().unwrap();
    assert!(find_record_by_id(&conn, "no-such-id").unwrap().is_none());
    assert!(find_record_by_set_number(&conn, "00000").unwrap().is_none());
}

#[test]
fn find_by_set_number() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();
    let found = find_record_by_set_number(&conn, "75192").unwrap().unwrap();
    assert_eq!(found.id, created.id);
}

#[test]
fn duplicate_set_number_is_rejected_by_index() {
    let conn = open_memory().unwrap();
    insert_record(&conn, &falcon()).unwrap();
    let err = insert_record(&conn, &NewRecord::new("75192", "Another Falcon")).unwrap_err();
    assert!(matches!(err, OperationError::DuplicateSetNumber(ref n) if n == "75192"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM catalog_records", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn update_changes_only_supplied_fields() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();

    let patch = RecordPatch {
        title: Some("Millennium Falcon UCS".to_string()),
        quantity_owned: Some(2),
        ..Default::default()
    };
    update_record(&conn, &created.id, &patch).unwrap();

    let found = find_record_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(found.title, "Millennium Falcon UCS");
    assert_eq!(found.quantity_owned, 2);
    assert_eq!(found.set_number, created.set_number);
    assert_eq!(found.description, created.description);
    assert_eq!(found.approximate_value, created.approximate_value);
    assert_eq!(found.created_at, created.created_at);
    assert!(found.updated_at >= created.updated_at);
}

#[test]
fn update_can_clear_nullable_fields() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();

    let patch = RecordPatch {
        notes: Some(None),
        approximate_value: Some(None),
        ..Default::default()
    };
    update_record(&conn, &created.id, &patch).unwrap();

    let found = find_record_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(found.notes, None);
    assert_eq!(found.approximate_value, None);
    assert_eq!(found.series, created.series);
}

#[test]
fn empty_update_is_a_noop() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();
    let before = find_record_by_id(&conn, &created.id).unwrap().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    update_record(&conn, &created.id, &RecordPatch::default()).unwrap();

    let after = find_record_by_id(&conn, &created.id).unwrap().unwrap();
    assert_eq!(before, after);
}

#[test]
fn update_missing_record_is_not_found() {
    let conn = open_memory().unwrap();
    let patch = RecordPatch {
        owned: Some(true),
        ..Default::default()
    };
    let err = update_record(&conn, "missing", &patch).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { ref id, .. } if id == "missing"));
}

#[test]
fn rename_onto_existing_set_number_conflicts() {
    let conn = open_memory().unwrap();
    insert_record(&conn, &falcon()).unwrap();
    let other = insert_record(&conn, &NewRecord::new("10497", "Galaxy Explorer")).unwrap();

    let patch = RecordPatch {
        set_number: Some("75192".to_string()),
        ..Default::default()
    };
    let err = update_record(&conn, &other.id, &patch).unwrap_err();
    assert!(matches!(err, OperationError::DuplicateSetNumber(_)));

    let unchanged = find_record_by_id(&conn, &other.id).unwrap().unwrap();
    assert_eq!(unchanged.set_number, "10497");
}

#[test]
fn update_refreshes_updated_at() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let patch = RecordPatch {
        owned: Some(false),
        ..Default::default()
    };
    update_record(&conn, &created.id, &patch).unwrap();

    let found = find_record_by_id(&conn, &created.id).unwrap().unwrap();
    assert!(found.updated_at > created.updated_at);
    assert_eq!(found.created_at, created.created_at);
}

#[test]
fn delete_removes_record() {
    let conn = open_memory().unwrap();
    let created = insert_record(&conn, &falcon()).unwrap();
    delete_record(&conn, &created.id).unwrap();
    assert!(find_record_by_id(&conn, &created.id).unwrap().is_none());
}

#[test]
fn delete_missing_is_not_found() {
    let conn = open_memory().unwrap();
    let err = delete_record(&conn, "missing").unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}
