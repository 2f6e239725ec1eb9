use time::Weekday;
use time::macros::date;

use super::*;

#[test]
fn iso_dates_parse_and_format() {
    assert_eq!(parse_iso("2026-10-16"), Some(date!(2026 - 10 - 16)));
    assert_eq!(parse_iso(" 2026-03-04 "), Some(date!(2026 - 03 - 04)));
    assert_eq!(parse_iso("2026-02-30"), None);
    assert_eq!(parse_iso(""), None);
    assert_eq!(format_iso(date!(2026 - 03 - 04)), "2026-03-04");
}

#[test]
fn labels_use_readable_names() {
    assert_eq!(month_label(date!(2026 - 10 - 16)), "October 2026");
    assert_eq!(weekday_label(date!(2026 - 10 - 16)), "Fri");
    assert_eq!(short_day_label(date!(2026 - 10 - 06)), "Tue, Oct 6");
}

#[test]
fn week_starts_on_sunday() {
    let week = week_of(date!(2026 - 10 - 16));
    assert_eq!(week[0], date!(2026 - 10 - 11));
    assert_eq!(week[0].weekday(), Weekday::Sunday);
    assert_eq!(week[6], date!(2026 - 10 - 17));
}

#[test]
fn week_of_a_sunday_starts_that_day_and_crosses_months() {
    let week = week_of(date!(2026 - 11 - 01));
    assert_eq!(week[0], date!(2026 - 11 - 01));

    let week = week_of(date!(2026 - 12 - 31));
    assert_eq!(week[0], date!(2026 - 12 - 27));
    assert_eq!(week[6], date!(2027 - 01 - 02));
}

#[test]
fn today_is_a_real_date() {
    assert!(today().year() >= 2024);
}
