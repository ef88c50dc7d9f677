//! Day grid layout for the page month.

use chrono::{Datelike, Days, NaiveDate, Weekday};

const DATE_COLUMNS: usize = 7;
const DATE_ROWS: usize = 6;

/// One grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    /// Week number: ISO 8601 for Monday-first grids, otherwise the week of
    /// year where week 1 contains January 1st.
    pub number: u32,
    /// Days in display order.
    pub days: [NaiveDate; DATE_COLUMNS],
}

/// Props for the day grid surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarBodyProps {
    /// Six weeks covering the page month.
    pub weeks: Vec<Week>,
    /// Show the week number column.
    pub show_week_numbers: bool,
    /// Weeks start on Monday.
    pub iso_week: bool,
}

/// Builds the six-week grid containing `page`'s month.
///
/// The first row starts on the week start on or before the 1st. Returns fewer
/// rows only at the edges of chrono's supported range.
pub fn month_weeks(page: NaiveDate, iso_week: bool) -> Vec<Week> {
    let Some(first) = page.with_day(1) else {
        return Vec::new();
    };
    let offset = days_from_week_start(first.weekday(), iso_week);
    let Some(mut start) = first.checked_sub_days(Days::new(u64::from(offset))) else {
        return Vec::new();
    };

    let mut weeks = Vec::with_capacity(DATE_ROWS);
    for _ in 0..DATE_ROWS {
        let mut days = [start; DATE_COLUMNS];
        for (idx, slot) in days.iter_mut().enumerate() {
            match start.checked_add_days(Days::new(idx as u64)) {
                Some(day) => *slot = day,
                None => return weeks,
            }
        }
        weeks.push(Week {
            number: week_number(start, iso_week),
            days,
        });
        match start.checked_add_days(Days::new(DATE_COLUMNS as u64)) {
            Some(next) => start = next,
            None => break,
        }
    }
    weeks
}

fn days_from_week_start(weekday: Weekday, iso_week: bool) -> u32 {
    if iso_week {
        weekday.num_days_from_monday()
    } else {
        weekday.num_days_from_sunday()
    }
}

/// Week number of the week starting at `week_start`.
pub fn week_number(week_start: NaiveDate, iso_week: bool) -> u32 {
    if iso_week {
        week_start.iso_week().week()
    } else {
        sunday_week_number(week_start).unwrap_or(1)
    }
}

fn sunday_week_number(date: NaiveDate) -> Option<u32> {
    let start = date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))?;
    let week_year = start.checked_add_days(Days::new(6))?.year();
    let jan_first = NaiveDate::from_ymd_opt(week_year, 1, 1)?;
    let first_week =
        jan_first.checked_sub_days(Days::new(u64::from(jan_first.weekday().num_days_from_sunday())))?;
    let weeks = start.signed_duration_since(first_week).num_days() / 7;
    u32::try_from(weeks + 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn grid_has_six_full_weeks() {
        let weeks = month_weeks(day(2024, 2, 14), false);
        assert_eq!(weeks.len(), 6);
        // February 1st 2024 is a Thursday.
        assert_eq!(weeks[0].days[0], day(2024, 1, 28));
        assert_eq!(weeks[0].days[4], day(2024, 2, 1));
        assert_eq!(weeks[5].days[6], day(2024, 3, 9));
    }

    #[test]
    fn iso_grid_starts_on_monday() {
        let weeks = month_weeks(day(2024, 2, 14), true);
        assert_eq!(weeks[0].days[0], day(2024, 1, 29));
        assert_eq!(weeks[0].days[0].weekday(), Weekday::Mon);
        assert_eq!(weeks[0].number, 5);
    }

    #[test]
    fn month_starting_on_week_start_begins_the_grid() {
        // September 1st 2024 is a Sunday.
        let weeks = month_weeks(day(2024, 9, 30), false);
        assert_eq!(weeks[0].days[0], day(2024, 9, 1));
        assert_eq!(weeks[0].number, 36);
    }

    #[test]
    fn sunday_weeks_roll_into_next_year() {
        // Week of 2023-12-31 contains January 1st 2024.
        assert_eq!(week_number(day(2023, 12, 31), false), 1);
        assert_eq!(week_number(day(2024, 1, 7), false), 2);
        assert_eq!(week_number(day(2023, 12, 24), false), 52);
    }
}
