use chrono::NaiveDate;
use rcycletimer::export::range::{parse_optional_range, parse_range};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_single_periods() {
    assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
    assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(parse_range("2025-12").unwrap(), (d(2025, 12, 1), d(2025, 12, 31)));
    assert_eq!(
        parse_range("2025-03-10").unwrap(),
        (d(2025, 3, 10), d(2025, 3, 10))
    );
}

#[test]
fn test_ranges() {
    assert_eq!(
        parse_range("2024:2025").unwrap(),
        (d(2024, 1, 1), d(2025, 12, 31))
    );
    assert_eq!(
        parse_range("2025-01:2025-02").unwrap(),
        (d(2025, 1, 1), d(2025, 2, 28))
    );
}

#[test]
fn test_invalid_ranges() {
    assert!(parse_range("2025:2025-01").is_err());
    assert!(parse_range("2025-02:2025-01").is_err());
    assert!(parse_range("2025-13").is_err());
    assert!(parse_range("yesterday").is_err());
}

#[test]
fn test_all_disables_filter() {
    assert_eq!(parse_optional_range(None).unwrap(), None);
    assert_eq!(parse_optional_range(Some("ALL")).unwrap(), None);
    assert!(parse_optional_range(Some("2025")).unwrap().is_some());
}
