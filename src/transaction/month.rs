//! Calendar-month window math for the transactions listing.

use time::{Date, Month, OffsetDateTime, Time};

/// The half-open interval [start, end) covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// Midnight UTC on the first day of the month.
    pub start: OffsetDateTime,
    /// Midnight UTC on the first day of the following month (exclusive).
    pub end: OffsetDateTime,
}

/// The window covering the current calendar month in UTC.
pub fn current_month_window() -> MonthWindow {
    month_window(OffsetDateTime::now_utc().date())
}

/// The window covering the calendar month that contains `date`.
pub fn month_window(date: Date) -> MonthWindow {
    let start =
        Date::from_calendar_date(date.year(), date.month(), 1).expect("invalid month start date");

    let (next_year, next_month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        month => (date.year(), month.next()),
    };
    let end = Date::from_calendar_date(next_year, next_month, 1)
        .expect("invalid next month start date");

    MonthWindow {
        start: OffsetDateTime::new_utc(start, Time::MIDNIGHT),
        end: OffsetDateTime::new_utc(end, Time::MIDNIGHT),
    }
}
