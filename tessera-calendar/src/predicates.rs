//! Disabled and hidden rules for dates and time units.
//!
//! Callers supply any subset of rules through [`PredicateOptions`];
//! [`PredicateSet::compose`] turns them into a set where every rule is
//! callable. Time rules receive the unit value and the page date it belongs to.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use derive_setters::Setters;

use crate::{date::days_in_month, prop::Predicate};

/// Rule over a whole date.
pub type DatePredicate = Predicate<NaiveDateTime>;

/// Rule over a time unit value (hour, minute or second) and its page date.
pub type TimePredicate = Predicate<(u32, NaiveDateTime)>;

/// Optional caller rules, as configured on the calendar.
#[derive(Clone, Debug, Default, PartialEq, Setters)]
#[setters(strip_option)]
pub struct PredicateOptions {
    /// Dates that cannot be selected.
    pub disabled_date: Option<DatePredicate>,
    /// Hours that cannot be selected.
    pub disabled_hours: Option<TimePredicate>,
    /// Minutes that cannot be selected.
    pub disabled_minutes: Option<TimePredicate>,
    /// Seconds that cannot be selected.
    pub disabled_seconds: Option<TimePredicate>,
    /// Hours left out of the time panel.
    pub hide_hours: Option<TimePredicate>,
    /// Minutes left out of the time panel.
    pub hide_minutes: Option<TimePredicate>,
    /// Seconds left out of the time panel.
    pub hide_seconds: Option<TimePredicate>,
}

/// Normalized rules; every slot is total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredicateSet {
    /// Dates that cannot be selected.
    pub disabled_date: DatePredicate,
    /// Hours that cannot be selected.
    pub disabled_hours: TimePredicate,
    /// Minutes that cannot be selected.
    pub disabled_minutes: TimePredicate,
    /// Seconds that cannot be selected.
    pub disabled_seconds: TimePredicate,
    /// Hours left out of the time panel.
    pub hide_hours: TimePredicate,
    /// Minutes left out of the time panel.
    pub hide_minutes: TimePredicate,
    /// Seconds left out of the time panel.
    pub hide_seconds: TimePredicate,
}

impl PredicateSet {
    /// Fills every absent rule with [`Predicate::never`].
    pub fn compose(options: &PredicateOptions) -> Self {
        Self {
            disabled_date: options.disabled_date.clone().into(),
            disabled_hours: options.disabled_hours.clone().into(),
            disabled_minutes: options.disabled_minutes.clone().into(),
            disabled_seconds: options.disabled_seconds.clone().into(),
            hide_hours: options.hide_hours.clone().into(),
            hide_minutes: options.hide_minutes.clone().into(),
            hide_seconds: options.hide_seconds.clone().into(),
        }
    }

    /// Whether a date is disabled.
    pub fn is_date_disabled(&self, date: NaiveDateTime) -> bool {
        self.disabled_date.test(date)
    }

    /// Whether the time of `date` is unavailable.
    ///
    /// Any disabled or hidden rule matching the hour, minute or second of
    /// `date` makes the whole time unavailable. Pass the page date of the
    /// current render.
    pub fn is_time_disabled(&self, date: NaiveDateTime) -> bool {
        let (hour, minute, second) = (date.hour(), date.minute(), date.second());
        self.disabled_hours.test((hour, date))
            || self.disabled_minutes.test((minute, date))
            || self.disabled_seconds.test((second, date))
            || self.hide_hours.test((hour, date))
            || self.hide_minutes.test((minute, date))
            || self.hide_seconds.test((second, date))
    }

    /// Whether the hour option is disabled for the page date.
    pub fn is_hour_disabled(&self, hour: u32, date: NaiveDateTime) -> bool {
        self.disabled_hours.test((hour, date))
    }

    /// Whether the minute option is disabled for the page date.
    ///
    /// A disabled page hour disables all of its minutes.
    pub fn is_minute_disabled(&self, minute: u32, date: NaiveDateTime) -> bool {
        self.is_hour_disabled(date.hour(), date) || self.disabled_minutes.test((minute, date))
    }

    /// Whether the second option is disabled for the page date.
    ///
    /// A disabled page hour or page minute disables all of its seconds.
    pub fn is_second_disabled(&self, second: u32, date: NaiveDateTime) -> bool {
        self.is_minute_disabled(date.minute(), date) || self.disabled_seconds.test((second, date))
    }

    /// Whether the hour option is hidden.
    pub fn is_hour_hidden(&self, hour: u32, date: NaiveDateTime) -> bool {
        self.hide_hours.test((hour, date))
    }

    /// Whether the minute option is hidden.
    pub fn is_minute_hidden(&self, minute: u32, date: NaiveDateTime) -> bool {
        self.hide_minutes.test((minute, date))
    }

    /// Whether the second option is hidden.
    pub fn is_second_hidden(&self, second: u32, date: NaiveDateTime) -> bool {
        self.hide_seconds.test((second, date))
    }

    /// Whether every day of a month is disabled.
    pub fn is_month_disabled(&self, year: i32, month: u32) -> bool {
        is_month_disabled(&self.disabled_date, year, month)
    }
}

/// A month is disabled only when each of its days is.
pub(crate) fn is_month_disabled(disabled_date: &DatePredicate, year: i32, month: u32) -> bool {
    (1..=days_in_month(year, month)).all(|day| {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .is_none_or(|date| disabled_date.test(date))
    })
}
