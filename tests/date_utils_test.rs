use chrono::{NaiveDate, NaiveDateTime};
use requisitor::utils::date::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn test_format_ymd() {
    let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
    assert_eq!(format_ymd(date), "2023-12-25");
}

#[test]
fn test_format_display_patterns() {
    let dt = at(2025, 3, 5, 14, 7);
    assert_eq!(format(dt, DISPLAY_DATE_PATTERN), "05/03/2025");
    assert_eq!(format(dt, DISPLAY_DATETIME_PATTERN), "05/03/2025 14:07");
    assert_eq!(format(dt, "dd.MM.yy"), "05.03.25");
}

#[test]
fn test_format_leaves_unknown_text_untouched() {
    let dt = at(2025, 3, 5, 14, 7);
    assert_eq!(format(dt, "Q ww dd"), "Q ww 05");
    assert_eq!(format(dt, "no tokens"), "no tokens");
}

#[test]
fn test_format_replaces_first_occurrence_only() {
    let dt = at(2025, 3, 5, 14, 7);
    assert_eq!(format(dt, "dd dd"), "05 dd");
}

#[test]
fn test_format_str_invalid_date_is_empty() {
    assert_eq!(format_str("not-a-date", DISPLAY_DATE_PATTERN), "");
    assert_eq!(format_str("", DISPLAY_DATE_PATTERN), "");
    assert_eq!(format_str("2025-03-05", DISPLAY_DATE_PATTERN), "05/03/2025");
}

#[test]
fn test_difference_in_days_non_negative_for_ordered_pairs() {
    let start = at(2024, 2, 27, 18, 0);
    for offset in [0, 1, 2, 5, 30, 365] {
        let end = add_days(start, offset).unwrap();
        assert!(difference_in_days(end, start) >= 0);
        assert_eq!(difference_in_days(end, start), offset);
    }
}

#[test]
fn test_difference_in_days_crosses_leap_day() {
    assert_eq!(difference_in_days(at(2024, 3, 1, 0, 0), at(2024, 2, 28, 23, 0)), 2);
}

#[test]
fn test_difference_negative_when_left_precedes() {
    assert_eq!(difference_in_days(at(2025, 1, 1, 12, 0), at(2025, 1, 4, 8, 0)), -3);
}

#[test]
fn test_before_after_are_strict() {
    let dt = at(2025, 1, 1, 12, 0);
    assert!(!is_before(dt, dt));
    assert!(!is_after(dt, dt));
    assert!(is_before(start_of_day(dt), dt));
}

#[test]
fn test_add_and_sub_days() {
    let dt = at(2025, 1, 31, 9, 15);
    assert_eq!(add_days(dt, 1), Some(at(2025, 2, 1, 9, 15)));
    assert_eq!(sub_days(dt, 31), Some(at(2024, 12, 31, 9, 15)));
    assert_eq!(add_days(dt, -31), sub_days(dt, 31));
}

#[test]
fn test_day_shifts_degrade_instead_of_overflowing() {
    let dt = at(2025, 1, 1, 0, 0);
    assert_eq!(add_days(dt, 1_000_000_000), None);
    assert_eq!(sub_days(dt, i64::MAX / 1000), None);
}
