// Table tests for half-hour time slots, timelines and date keys

use chrono::NaiveDate;
use shift_board::models::timeline::{TimeSlot, Timeline};
use shift_board::utils::date::{date_key, parse_date_key, YearMonth};
use test_case::test_case;

#[test_case(0.0, Some(0) ; "midnight")]
#[test_case(9.5, Some(19) ; "half past nine")]
#[test_case(24.0, Some(48) ; "end of day")]
#[test_case(9.25, None ; "quarter hour")]
#[test_case(-0.5, None ; "before midnight")]
#[test_case(24.5, None ; "after end of day")]
#[test_case(f64::NAN, None ; "not a number")]
fn test_from_hours(hours: f64, expected: Option<u8>) {
    assert_eq!(TimeSlot::from_hours(hours).map(TimeSlot::half_hours), expected);
}

#[test_case(9.2, 9.0 ; "rounds down")]
#[test_case(9.3, 9.5 ; "rounds up")]
#[test_case(-3.0, 0.0 ; "saturates low")]
#[test_case(30.0, 24.0 ; "saturates high")]
fn test_nearest(hours: f64, expected: f64) {
    assert_eq!(TimeSlot::nearest(hours).hours(), expected);
}

#[test_case(6.0, "6:00" ; "on the hour")]
#[test_case(9.5, "9:30" ; "half past")]
#[test_case(23.5, "23:30" ; "two digit hour")]
fn test_display(hours: f64, expected: &str) {
    assert_eq!(TimeSlot::nearest(hours).to_string(), expected);
}

#[test_case(6.0, 24.0, 36 ; "default hours")]
#[test_case(9.0, 17.5, 17 ; "office hours")]
fn test_slot_count(open: f64, close: f64, expected: u8) {
    assert_eq!(Timeline::from_hours(open, close).unwrap().slot_count(), expected);
}

#[test_case(6.0, true ; "opening is a cell")]
#[test_case(23.5, true ; "last cell")]
#[test_case(24.0, false ; "closing is not a cell")]
#[test_case(5.5, false ; "before opening")]
fn test_has_cell(hours: f64, expected: bool) {
    assert_eq!(Timeline::default().has_cell(TimeSlot::nearest(hours)), expected);
}

#[test_case(8.0, 8.0 ; "empty")]
#[test_case(12.0, 8.0 ; "inverted")]
#[test_case(6.0, 25.0 ; "past midnight")]
fn test_invalid_timeline(open: f64, close: f64) {
    assert!(Timeline::from_hours(open, close).is_err());
}

#[test_case(2024, 2, 29 ; "leap february")]
#[test_case(2025, 2, 28 ; "common february")]
#[test_case(2025, 4, 30 ; "april")]
#[test_case(2025, 12, 31 ; "december")]
fn test_days_in_month(year: i32, month: u32, expected: u32) {
    assert_eq!(YearMonth::new(year, month).unwrap().days_in_month(), expected);
}

#[test_case("2024-06-01", true ; "valid")]
#[test_case("2024-6-1", false ; "unpadded")]
#[test_case("2024/06/01", false ; "slashes")]
#[test_case("2024-02-30", false ; "impossible day")]
fn test_parse_date_key(key: &str, valid: bool) {
    assert_eq!(parse_date_key(key).is_ok(), valid);
}

#[test]
fn test_date_key_pads_fields() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(date_key(date), "2025-03-07");
    assert_eq!(parse_date_key("2025-03-07").unwrap(), date);
}
