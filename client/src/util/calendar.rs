//! Calendar dates for pages that reason about "today".
//!
//! In the browser "today" is the user's local date from `js_sys::Date`;
//! elsewhere it is the UTC date. All formatting goes through `time`
//! format descriptions.

#[cfg(test)]
#[path = "calendar_test.rs"]
mod calendar_test;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration};

pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const MONTH_YEAR: &[BorrowedFormatItem<'static>] = format_description!("[month repr:long] [year]");
const WEEKDAY_SHORT: &[BorrowedFormatItem<'static>] = format_description!("[weekday repr:short]");
const SHORT_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short], [month repr:short] [day padding:none]");

// `YYYY-MM-DD` over the wire and in storage.
time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Today's date.
#[must_use]
pub fn today() -> Date {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        let month = u8::try_from(now.get_month() + 1)
            .ok()
            .and_then(|m| time::Month::try_from(m).ok())
            .unwrap_or(time::Month::January);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let year = now.get_full_year() as i32;
        let day = u8::try_from(now.get_date()).unwrap_or(1);
        Date::from_calendar_date(year, month, day).unwrap_or_else(|_| time::OffsetDateTime::UNIX_EPOCH.date())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        time::OffsetDateTime::now_utc().date()
    }
}

/// Parse a `YYYY-MM-DD` value, as produced by `<input type="date">`.
#[must_use]
pub fn parse_iso(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), ISO_DATE).ok()
}

#[must_use]
pub fn format_iso(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_default()
}

/// "October 2026".
#[must_use]
pub fn month_label(date: Date) -> String {
    date.format(MONTH_YEAR).unwrap_or_default()
}

/// "Fri".
#[must_use]
pub fn weekday_label(date: Date) -> String {
    date.format(WEEKDAY_SHORT).unwrap_or_default()
}

/// "Fri, Oct 16".
#[must_use]
pub fn short_day_label(date: Date) -> String {
    date.format(SHORT_DAY).unwrap_or_default()
}

/// The Sunday-first week containing `day`.
#[must_use]
pub fn week_of(day: Date) -> [Date; 7] {
    let sunday = day - Duration::days(i64::from(day.weekday().number_days_from_sunday()));
    std::array::from_fn(|i| sunday + Duration::days(i64::try_from(i).unwrap_or_default()))
}
