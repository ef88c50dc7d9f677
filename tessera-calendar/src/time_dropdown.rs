//! Time panel props.
//!
//! ## Usage
//!
//! Render one list per entry of [`TimeDropdownProps::columns`] and report a
//! picked option with [`crate::context::CalendarContext::change_time`] using
//! [`TimeDropdownProps::date_for`].

use chrono::{NaiveDateTime, Timelike};
use smallvec::SmallVec;

use crate::{
    format::{TimeColumns, hour_for_display},
    locale::CalendarLocale,
    predicates::PredicateSet,
};

/// Unit listed by a time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Hours of day.
    Hour,
    /// Minutes of hour.
    Minute,
    /// Seconds of minute.
    Second,
}

impl TimeUnit {
    /// Column title from the locale.
    pub fn title(self, locale: &CalendarLocale) -> &str {
        match self {
            Self::Hour => &locale.hours,
            Self::Minute => &locale.minutes,
            Self::Second => &locale.seconds,
        }
    }
}

/// One selectable value of a time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOption {
    /// Value written into the page date (hours in 24-hour form).
    pub value: u32,
    /// Value shown to the user (1-12 for meridian hours).
    pub display: u32,
    /// The page date currently holds this value.
    pub active: bool,
    /// The option cannot be picked.
    pub disabled: bool,
}

/// Options of one time unit, hidden options removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeColumn {
    /// Listed unit.
    pub unit: TimeUnit,
    /// Visible options in ascending order.
    pub options: Vec<TimeOption>,
}

/// Props for the time panel surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDropdownProps {
    /// The panel is exhibited.
    pub show: bool,
    /// Use a 12-hour clock.
    pub show_meridian: bool,
    /// Units the format asks for.
    pub columns: TimeColumns,
    /// Resolved page date.
    pub page_date: NaiveDateTime,
    pub(crate) predicates: PredicateSet,
}

impl TimeDropdownProps {
    /// Builds the visible columns.
    ///
    /// In meridian mode the hour column lists the page date's half of the day.
    pub fn columns(&self) -> SmallVec<[TimeColumn; 3]> {
        let date = self.page_date;
        let predicates = &self.predicates;
        let mut columns = SmallVec::new();
        if self.columns.hours {
            let hours = if self.show_meridian {
                let base = if date.hour() >= 12 { 12 } else { 0 };
                base..base + 12
            } else {
                0..24
            };
            let options = hours
                .filter(|&hour| !predicates.is_hour_hidden(hour, date))
                .map(|hour| TimeOption {
                    value: hour,
                    display: if self.show_meridian {
                        hour_for_display(hour)
                    } else {
                        hour
                    },
                    active: date.hour() == hour,
                    disabled: predicates.is_hour_disabled(hour, date),
                })
                .collect();
            columns.push(TimeColumn {
                unit: TimeUnit::Hour,
                options,
            });
        }
        if self.columns.minutes {
            let options = (0..60)
                .filter(|&minute| !predicates.is_minute_hidden(minute, date))
                .map(|minute| TimeOption {
                    value: minute,
                    display: minute,
                    active: date.minute() == minute,
                    disabled: predicates.is_minute_disabled(minute, date),
                })
                .collect();
            columns.push(TimeColumn {
                unit: TimeUnit::Minute,
                options,
            });
        }
        if self.columns.seconds {
            let options = (0..60)
                .filter(|&second| !predicates.is_second_hidden(second, date))
                .map(|second| TimeOption {
                    value: second,
                    display: second,
                    active: date.second() == second,
                    disabled: predicates.is_second_disabled(second, date),
                })
                .collect();
            columns.push(TimeColumn {
                unit: TimeUnit::Second,
                options,
            });
        }
        columns
    }

    /// Page date with one unit replaced; out-of-range values leave it as is.
    pub fn date_for(&self, unit: TimeUnit, value: u32) -> NaiveDateTime {
        let date = self.page_date;
        let next = match unit {
            TimeUnit::Hour => date.with_hour(value),
            TimeUnit::Minute => date.with_minute(value),
            TimeUnit::Second => date.with_second(value),
        };
        next.unwrap_or(date)
    }
}
