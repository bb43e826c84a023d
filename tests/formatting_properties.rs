use chrono::{Datelike, NaiveDate};
use contract_fields::{
    dates::{add_calendar_months, check_minimum_coverage},
    format::{
        digits_only, format_money, format_percentage, is_already_grouped_integer,
        parse_percentage_number,
    },
};

#[test]
fn money_round_trips_on_magnitude() {
    let mut n: u64 = 1;
    while n < 10_000_000_000_000 {
        for candidate in [n, n + 7, n * 3 + 1] {
            let formatted = format_money(Some(candidate as f64));
            assert_eq!(digits_only(&formatted), candidate.to_string());
            assert!(is_already_grouped_integer(&formatted), "{formatted}");
        }
        n *= 10;
    }
}

#[test]
fn zero_money_is_hidden() {
    assert_eq!(format_money(Some(0.0)), "");
    assert_eq!(digits_only(&format_money(Some(0.0))), "");
}

#[test]
fn percentage_parsing_handles_both_locales() {
    assert_eq!(parse_percentage_number("12,5"), Some(12.5));
    assert_eq!(parse_percentage_number("12.5"), Some(12.5));
    assert_eq!(parse_percentage_number("1.234,56"), Some(1234.56));
    assert_eq!(parse_percentage_number("1,234.56"), Some(1234.56));
    assert_eq!(parse_percentage_number("12,5%"), Some(12.5));
    assert_eq!(parse_percentage_number("sin dato"), None);
}

#[test]
fn percentage_rendering_drops_whole_decimals() {
    assert_eq!(format_percentage(Some(12.0)), "12%");
    assert_eq!(format_percentage(Some(12.5)), "12.5%");
    assert_eq!(
        format_percentage(parse_percentage_number(&format_percentage(Some(3.75)))),
        "3.75%"
    );
}

#[test]
fn month_end_rolls_over_into_march() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let end = add_calendar_months(start, 1).unwrap();
    assert_eq!(end.month(), 3);
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
}

#[test]
fn six_month_policy_ending_a_day_early_fails() {
    let check = check_minimum_coverage(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        6,
    );
    assert!(!check.ok);
    assert!(check.notes[0].contains("2024-07-01"));
    assert!(check.notes[0].contains("2024-06-30"));
}
