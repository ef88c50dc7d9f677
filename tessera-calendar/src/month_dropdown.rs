//! Month panel props.
//!
//! The panel lists one row per year. Rows start `limit_start_year` years back
//! (counting the current year), or at 1900, and run for `limit_end_year` years
//! from the current year onwards.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDateTime};

use crate::{
    date::{now, with_year_month},
    predicates::{DatePredicate, is_month_disabled},
};

/// First year listed when no start limit is configured.
pub const DEFAULT_START_YEAR: i32 = 1900;

/// Years listed from the current year onwards when no end limit is configured.
pub const DEFAULT_LIMIT_END_YEAR: u32 = 5;

/// One month entry in a year row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    /// Month number (1-12).
    pub month: u32,
    /// The page date is in this month.
    pub active: bool,
    /// Every day of the month is disabled.
    pub disabled: bool,
}

/// Months of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRow {
    /// Row year.
    pub year: i32,
    /// January to December.
    pub months: [MonthCell; 12],
}

/// Props for the month panel surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDropdownProps {
    /// The panel is exhibited.
    pub show: bool,
    /// How many years back from the current year to list, counting it.
    pub limit_start_year: Option<u32>,
    /// How many years to list from the current year onwards, counting it.
    pub limit_end_year: Option<u32>,
    /// Resolved page date.
    pub page_date: NaiveDateTime,
    pub(crate) disabled_date: DatePredicate,
}

impl MonthDropdownProps {
    /// Years listed relative to `this_year`. Empty when the limits cross.
    ///
    /// Limits too large for the year type saturate.
    pub fn year_range(&self, this_year: i32) -> RangeInclusive<i32> {
        let start = match self.limit_start_year {
            Some(limit) if limit > 0 => this_year.saturating_sub(clamp_limit(limit) - 1),
            _ => DEFAULT_START_YEAR,
        };
        let limit_end = clamp_limit(self.limit_end_year.unwrap_or(DEFAULT_LIMIT_END_YEAR));
        start..=this_year.saturating_add(limit_end).saturating_sub(1)
    }

    /// Year rows relative to the current year.
    pub fn rows(&self) -> Vec<MonthRow> {
        self.rows_for(now().year())
    }

    /// Year rows relative to `this_year`.
    pub fn rows_for(&self, this_year: i32) -> Vec<MonthRow> {
        self.year_range(this_year)
            .map(|year| MonthRow {
                year,
                months: std::array::from_fn(|idx| {
                    let month = idx as u32 + 1;
                    MonthCell {
                        month,
                        active: self.page_date.year() == year && self.page_date.month() == month,
                        disabled: self.is_month_disabled(year, month),
                    }
                }),
            })
            .collect()
    }

    /// Whether every day of the month is disabled.
    pub fn is_month_disabled(&self, year: i32, month: u32) -> bool {
        is_month_disabled(&self.disabled_date, year, month)
    }

    /// Date reported when a month cell is picked: the page date moved to that
    /// month, day clamped.
    pub fn date_for(&self, year: i32, month: u32) -> NaiveDateTime {
        with_year_month(self.page_date, year, month)
    }
}

fn clamp_limit(limit: u32) -> i32 {
    i32::try_from(limit).unwrap_or(i32::MAX)
}
