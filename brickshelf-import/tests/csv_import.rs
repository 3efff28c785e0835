use brickshelf_catalog::types::*;
use brickshelf_db::*;
use brickshelf_import::*;
use chrono::NaiveDate;

const HEADER_LINE: &str = "Set Number,Alternate Set Number,Title,Owned,Quantity Owned,Release Year,Description,Series,Number of Parts,Number of Minifigs,Bricklink URL,Approximate Value,Value Last Updated,Notes\n";

fn setup_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();

    let mut falcon = NewRecord::new("75192", "Millennium Falcon");
    falcon.alternate_set_number = Some("75192-1".to_string());
    falcon.owned = true;
    falcon.quantity_owned = 1;
    falcon.release_year = Some(2017);
    falcon.description = Some("Ultimate Collector Series, with \"quotes\"".to_string());
    falcon.series = Some("Star Wars".to_string());
    falcon.num_parts = 7541;
    falcon.num_minifigs = 8;
    falcon.bricklink_url = Some("https://www.bricklink.com/v2/catalog/catalogitem.page?S=75192-1".to_string());
    falcon.approximate_value = Some(849.99);
    falcon.value_last_updated = NaiveDate::from_ymd_opt(2024, 1, 15);
    falcon.notes = Some("Line one\nline two".to_string());
    insert_record(&conn, &falcon).unwrap();

    insert_record(&conn, &NewRecord::new("10497", "Galaxy Explorer")).unwrap();
    conn
}

fn export_to_string(records: &[CatalogRecord]) -> String {
    let mut buf = Vec::new();
    export_csv(records, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn count_records(conn: &rusqlite::Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM catalog_records", [], |r| r.get(0))
        .unwrap()
}

// ── Export ──────────────────────────────────────────────────────────────────

#[test]
fn export_writes_header_and_rows() {
    let conn = setup_db();
    let records = list_all_records(&conn).unwrap();
    let text = export_to_string(&records);

    assert!(text.starts_with(HEADER_LINE));
    assert!(text.contains("10497,,Galaxy Explorer,false,0,,,,0,0,,,,\n"));
    assert!(text.contains("849.99,2024-01-15"));
    assert!(text.contains("\"Ultimate Collector Series, with \"\"quotes\"\"\""));
}

#[test]
fn export_formats_value_with_two_decimals() {
    let conn = open_memory().unwrap();
    let mut record = NewRecord::new("6166", "Large Creative Bucket");
    record.approximate_value = Some(30.0);
    insert_record(&conn, &record).unwrap();

    let text = export_to_string(&list_all_records(&conn).unwrap());
    assert!(text.contains(",30.00,"));
}

#[test]
fn export_of_empty_collection_is_header_only() {
    assert_eq!(export_to_string(&[]), HEADER_LINE);
}

// ── Parse ───────────────────────────────────────────────────────────────────

#[test]
fn parse_applies_lenient_coercion() {
    let text = format!(
        "{HEADER_LINE}21318,,Tree House,TRUE,many,unknown,,Ideas,3036,4,,cheap,last week,\n"
    );
    let rows = parse_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.set_number, "21318");
    assert_eq!(row.alternate_set_number, None);
    assert!(row.owned);
    assert_eq!(row.quantity_owned, 0);
    assert_eq!(row.release_year, None);
    assert_eq!(row.series.as_deref(), Some("Ideas"));
    assert_eq!(row.num_parts, 3036);
    assert_eq!(row.approximate_value, None);
    assert_eq!(row.value_last_updated, None);
    assert_eq!(row.notes, None);
}

#[test]
fn parse_skips_rows_without_set_number() {
    let text = format!(
        "{HEADER_LINE},,Orphan row,true,1,,,,0,0,,,,\n10497,,Galaxy Explorer,false,0,,,,0,0,,,,\n"
    );
    let rows = parse_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].set_number, "10497");
}

#[test]
fn parse_accepts_any_header_names() {
    let text = "a,b,c,d,e,f,g,h,i,j,k,l,m,n\n10497,,Galaxy Explorer,1,1,2022,,,1254,4,,99.99,2022-08-01,\n";
    let rows = parse_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].release_year, Some(2022));
}

#[test]
fn parse_rejects_wrong_header_width() {
    let text = "Set Number,Title\n10497,Galaxy Explorer\n";
    let err = parse_csv(text.as_bytes()).unwrap_err();
    assert!(matches!(err, CsvError::InvalidHeader { expected: 14, found: 2 }));
}

#[test]
fn parse_rejects_empty_input() {
    let err = parse_csv("".as_bytes()).unwrap_err();
    assert!(matches!(err, CsvError::InvalidHeader { found: 0, .. }));
}

#[test]
fn parse_reports_line_of_short_row() {
    let text = format!(
        "{HEADER_LINE}10497,,Galaxy Explorer,false,0,,,,0,0,,,,\n75192,Millennium Falcon\n"
    );
    let err = parse_csv(text.as_bytes()).unwrap_err();
    assert!(matches!(err, CsvError::MalformedRow { line: 3, .. }), "got {err:?}");
}

// ── Import ──────────────────────────────────────────────────────────────────

#[test]
fn round_trip_into_empty_store() {
    let source = setup_db();
    let originals = list_all_records(&source).unwrap();
    let text = export_to_string(&originals);

    let target = open_memory().unwrap();
    let summary = import_csv(&target, text.as_bytes(), None).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);
    assert!(summary.errors.is_empty());

    for original in &originals {
        let copy = find_record_by_set_number(&target, &original.set_number)
            .unwrap()
            .unwrap();
        assert_eq!(copy.alternate_set_number, original.alternate_set_number);
        assert_eq!(copy.title, original.title);
        assert_eq!(copy.owned, original.owned);
        assert_eq!(copy.quantity_owned, original.quantity_owned);
        assert_eq!(copy.release_year, original.release_year);
        assert_eq!(copy.description, original.description);
        assert_eq!(copy.series, original.series);
        assert_eq!(copy.num_parts, original.num_parts);
        assert_eq!(copy.num_minifigs, original.num_minifigs);
        assert_eq!(copy.bricklink_url, original.bricklink_url);
        assert_eq!(copy.approximate_value, original.approximate_value);
        assert_eq!(copy.value_last_updated, original.value_last_updated);
        assert_eq!(copy.notes, original.notes);
    }
}

#[test]
fn existing_set_number_is_skipped() {
    let conn = setup_db();
    let before = find_record_by_set_number(&conn, "75192").unwrap().unwrap();

    let text = format!(
        "{HEADER_LINE}75192,,Replacement Falcon,false,0,,,,1,0,,,,\n21318,,Tree House,true,1,2019,,Ideas,3036,4,,,,\n"
    );
    let summary = import_csv(&conn, text.as_bytes(), Some(&SilentProgress)).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 1);
    assert!(summary.errors.is_empty());

    let after = find_record_by_set_number(&conn, "75192").unwrap().unwrap();
    assert_eq!(before, after);
}

#[test]
fn repeated_set_number_within_file_is_skipped() {
    let conn = open_memory().unwrap();
    let text = format!(
        "{HEADER_LINE}21318,,Tree House,true,1,,,,0,0,,,,\n21318,,Tree House again,true,1,,,,0,0,,,,\n"
    );
    let summary = import_csv(&conn, text.as_bytes(), None).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        find_record_by_set_number(&conn, "21318").unwrap().unwrap().title,
        "Tree House"
    );
}

#[test]
fn bad_header_creates_nothing() {
    let conn = open_memory().unwrap();
    let text = "Set Number,Title,Owned\n21318,Tree House,true\n";
    let err = import_csv(&conn, text.as_bytes(), None).unwrap_err();
    assert!(matches!(err, CsvError::InvalidHeader { .. }));
    assert_eq!(count_records(&conn), 0);
}

#[test]
fn malformed_row_creates_nothing() {
    let conn = open_memory().unwrap();
    let text = format!("{HEADER_LINE}21318,,Tree House,true,1,,,,0,0,,,,\n10497,too,short\n");
    let err = import_csv(&conn, text.as_bytes(), None).unwrap_err();
    assert!(matches!(err, CsvError::MalformedRow { .. }));
    assert_eq!(count_records(&conn), 0);
}

#[test]
fn invalid_rows_are_reported_and_others_imported() {
    let conn = open_memory().unwrap();
    let requests = vec![
        NewRecord::new("21318", "Tree House"),
        NewRecord::new("10497", "   "),
        NewRecord::new("6166", "Large Creative Bucket"),
    ];
    let summary = import_records(&conn, &requests, Some(&LogProgress));

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("10497"));
    assert_eq!(summary.total(), 3);
    assert_eq!(count_records(&conn), 2);
}
