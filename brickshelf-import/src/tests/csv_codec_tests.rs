use super::*;

#[test]
fn owned_accepts_only_known_spellings() {
    for cell in ["true", "True", "TRUE", "1"] {
        assert!(parse_owned(cell), "{cell} should be owned");
    }
    for cell in ["", "false", "yes", "tRuE", "0", " true"] {
        assert!(!parse_owned(cell), "{cell:?} should not be owned");
    }
}

#[test]
fn counts_fall_back_to_zero() {
    assert_eq!(parse_count("12"), 12);
    assert_eq!(parse_count(" 7 "), 7);
    assert_eq!(parse_count(""), 0);
    assert_eq!(parse_count("lots"), 0);
    assert_eq!(parse_count("3.5"), 0);
}

#[test]
fn optional_numbers_fall_back_to_none() {
    assert_eq!(parse_optional_int("2017"), Some(2017));
    assert_eq!(parse_optional_int("MMXVII"), None);
    assert_eq!(parse_optional_int(""), None);

    assert_eq!(parse_optional_float("849.99"), Some(849.99));
    assert_eq!(parse_optional_float("$849"), None);
    assert_eq!(parse_optional_float("NaN"), None);
    assert_eq!(parse_optional_float(""), None);
}

#[test]
fn dates_use_day_format() {
    assert_eq!(parse_optional_date("2024-01-15"), NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(parse_optional_date("15/01/2024"), None);
    assert_eq!(parse_optional_date("2024-02-30"), None);
    assert_eq!(parse_optional_date(""), None);
}

#[test]
fn empty_cells_become_none() {
    assert_eq!(non_empty(""), None);
    assert_eq!(non_empty("Star Wars"), Some("Star Wars".to_string()));
}

#[test]
fn header_has_fourteen_columns() {
    assert_eq!(CSV_HEADER.len(), 14);
    assert_eq!(CSV_HEADER[0], "Set Number");
    assert_eq!(CSV_HEADER[13], "Notes");
}
