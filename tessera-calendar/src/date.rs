//! Page date helpers.
//!
//! The page date is the `NaiveDateTime` the calendar currently displays. It is
//! owned by the caller; these helpers only derive proposals from it.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use crate::error::{CalendarError, Result};

/// Returns the current local date and time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolves the caller-supplied page date, falling back to [`now`] when absent.
pub fn resolve_page_date(value: Option<NaiveDateTime>) -> NaiveDateTime {
    match value {
        Some(date) => date,
        None => {
            let fallback = now();
            debug!(%fallback, "no page date supplied, using current time");
            fallback
        }
    }
}

/// Builds a page date from raw components.
///
/// Callers holding untrusted components use `try_page_date(..).ok()` so that
/// an invalid date degrades to "absent".
pub fn try_page_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarError::InvalidDate { year, month, day })?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(CalendarError::InvalidTime {
        hour,
        minute,
        second,
    })?;
    Ok(date.and_time(time))
}

/// Adds or subtracts whole calendar months.
///
/// The day of month is kept when it exists in the target month and clamped to
/// the target month's last day otherwise; the time of day is unchanged. Dates
/// beyond chrono's supported range are returned unchanged.
pub fn add_months(date: NaiveDateTime, delta: i32) -> NaiveDateTime {
    let total = date.year() * 12 + (date.month() as i32 - 1) + delta;
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(target) => target.and_time(date.time()),
        None => {
            debug!(%date, delta, "month offset leaves the supported range");
            date
        }
    }
}

/// Moves `date` to the given year and month, clamping the day.
pub fn with_year_month(date: NaiveDateTime, year: i32, month: u32) -> NaiveDateTime {
    let month = month.clamp(1, 12);
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|target| target.and_time(date.time()))
        .unwrap_or(date)
}

/// Returns true when both dates fall in the same year and month.
pub fn is_same_month(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Returns true when both dates fall on the same calendar day.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Shifts the hour by twelve within the same day (AM <-> PM).
pub fn toggle_meridian(date: NaiveDateTime) -> NaiveDateTime {
    let hour = date.hour();
    let next = if hour >= 12 { hour - 12 } else { hour + 12 };
    date.with_hour(next).unwrap_or(date)
}

/// Number of days in the given month, 30 for out-of-range months.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        try_page_date(year, month, day, hour, 30, 15).expect("valid test date")
    }

    #[test]
    fn add_months_keeps_day_and_time() {
        let next = add_months(at(2024, 3, 15, 9), 1);
        assert_eq!(next, at(2024, 4, 15, 9));
    }

    #[test]
    fn add_months_clamps_to_last_day() {
        assert_eq!(add_months(at(2024, 1, 31, 0), 1), at(2024, 2, 29, 0));
        assert_eq!(add_months(at(2023, 1, 31, 0), 1), at(2023, 2, 28, 0));
        assert_eq!(add_months(at(2024, 3, 31, 0), -1), at(2024, 2, 29, 0));
        assert_eq!(add_months(at(2024, 5, 31, 0), 1), at(2024, 6, 30, 0));
    }

    #[test]
    fn add_months_crosses_years() {
        assert_eq!(add_months(at(2024, 12, 10, 0), 1), at(2025, 1, 10, 0));
        assert_eq!(add_months(at(2024, 1, 10, 0), -1), at(2023, 12, 10, 0));
        assert_eq!(add_months(at(2024, 1, 10, 0), -25), at(2021, 12, 10, 0));
    }

    #[test]
    fn forward_then_backward_stays_in_month() {
        let start = at(2024, 1, 31, 12);
        let back = add_months(add_months(start, 1), -1);
        assert!(is_same_month(start, back));
        assert_eq!(back.day(), 29);
    }

    #[test]
    fn try_page_date_reports_invalid_parts() {
        assert_eq!(
            try_page_date(2023, 2, 29, 0, 0, 0),
            Err(CalendarError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert_eq!(
            try_page_date(2023, 2, 28, 24, 0, 0),
            Err(CalendarError::InvalidTime {
                hour: 24,
                minute: 0,
                second: 0
            })
        );
    }

    #[test]
    fn absent_page_date_resolves_to_now() {
        let before = now();
        let resolved = resolve_page_date(None);
        let after = now();
        assert!(before <= resolved && resolved <= after);

        let fixed = at(2020, 6, 1, 8);
        assert_eq!(resolve_page_date(Some(fixed)), fixed);
    }

    #[test]
    fn meridian_toggle_stays_on_same_day() {
        assert_eq!(toggle_meridian(at(2024, 5, 5, 9)), at(2024, 5, 5, 21));
        assert_eq!(toggle_meridian(at(2024, 5, 5, 12)), at(2024, 5, 5, 0));
    }

    #[test]
    fn with_year_month_clamps_day() {
        assert_eq!(with_year_month(at(2024, 3, 31, 4), 2023, 2), at(2023, 2, 28, 4));
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert_eq!(days_in_month(2100, 2), 28);
    }
}
