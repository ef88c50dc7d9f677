//! Shared, read-only context handed to every calendar surface.
//!
//! A fresh [`CalendarContext`] is built on every render pass and passed by
//! reference to the header, day grid, month panel and time panel, so they all
//! agree on the page date, the disabled rules and the callback bindings.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    date::{is_same_day, is_same_month},
    format::format_date,
    locale::CalendarLocale,
    predicates::DatePredicate,
    prop::CallbackWith,
};

/// What triggered an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputSource {
    /// Mouse, touch or pen.
    #[default]
    Pointer,
    /// Keyboard activation.
    Keyboard,
    /// Triggered by code rather than the user.
    Programmatic,
}

/// Selected range endpoints; holds zero, one or two dates.
pub type DateRange = SmallVec<[NaiveDateTime; 2]>;

/// Callback receiving a date and the interaction that produced it.
pub type DateCallback = CallbackWith<(NaiveDateTime, InputSource)>;

/// Derived state of a single day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Cell date at the page date's time of day.
    pub date: NaiveDateTime,
    /// The cell belongs to the page month.
    pub in_same_month: bool,
    /// The cell is disabled.
    pub disabled: bool,
    /// The cell is selected (page date or a range endpoint).
    pub selected: bool,
    /// The cell lies strictly inside the hover or selected range.
    pub in_range: bool,
    /// Extra class supplied by the caller.
    pub class_name: Option<String>,
    /// Accessible title, formatted with the locale's day pattern.
    pub title: String,
}

/// Render-scoped context shared with child surfaces.
#[derive(Clone, Debug)]
pub struct CalendarContext {
    pub(crate) date: NaiveDateTime,
    pub(crate) date_range: DateRange,
    pub(crate) hover_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub(crate) disabled_date: DatePredicate,
    pub(crate) format: Arc<str>,
    pub(crate) iso_week: bool,
    pub(crate) show_week_numbers: bool,
    pub(crate) inline: bool,
    pub(crate) target_id: Option<String>,
    pub(crate) locale: Arc<CalendarLocale>,
    pub(crate) on_change_month: DateCallback,
    pub(crate) on_change_time: Option<DateCallback>,
    pub(crate) on_select: Option<DateCallback>,
    pub(crate) on_mouse_move: Option<CallbackWith<NaiveDateTime>>,
    pub(crate) cell_class_name: Option<CallbackWith<NaiveDateTime, Option<String>>>,
}

impl CalendarContext {
    /// The resolved page date.
    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Selected range endpoints.
    pub fn date_range(&self) -> &[NaiveDateTime] {
        &self.date_range
    }

    /// Range currently under the pointer, if any.
    pub fn hover_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.hover_range
    }

    /// The calendar's format string.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Weeks start on Monday.
    pub fn iso_week(&self) -> bool {
        self.iso_week
    }

    /// Week numbers are shown next to the grid.
    pub fn show_week_numbers(&self) -> bool {
        self.show_week_numbers
    }

    /// The calendar is rendered inline rather than in a popup.
    pub fn inline(&self) -> bool {
        self.inline
    }

    /// Id of the element that opened the calendar.
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Locale strings.
    pub fn locale(&self) -> &CalendarLocale {
        &self.locale
    }

    /// Whether `date` falls in the page month.
    pub fn in_same_month(&self, date: NaiveDateTime) -> bool {
        is_same_month(self.date, date)
    }

    /// Whether `date` is disabled.
    pub fn is_disabled_date(&self, date: NaiveDateTime) -> bool {
        self.disabled_date.test(date)
    }

    /// Reports a month picked in the month panel. Collapses the calendar.
    pub fn change_month(&self, date: NaiveDateTime, source: InputSource) {
        self.on_change_month.call((date, source));
    }

    /// Reports a time picked in the time panel.
    pub fn change_time(&self, date: NaiveDateTime, source: InputSource) {
        trace!(%date, ?source, "calendar time changed");
        if let Some(on_change_time) = &self.on_change_time {
            on_change_time.call((date, source));
        }
    }

    /// Reports a day picked in the grid.
    pub fn select(&self, date: NaiveDateTime, source: InputSource) {
        trace!(%date, ?source, "calendar date selected");
        if let Some(on_select) = &self.on_select {
            on_select.call((date, source));
        }
    }

    /// Reports the pointer entering a day cell.
    pub fn mouse_move(&self, date: NaiveDateTime) {
        if let Some(on_mouse_move) = &self.on_mouse_move {
            on_mouse_move.call(date);
        }
    }

    /// Caller-supplied class for a cell.
    pub fn cell_class_name(&self, date: NaiveDateTime) -> Option<String> {
        self.cell_class_name
            .as_ref()
            .and_then(|cell_class_name| cell_class_name.call(date))
    }

    /// Derives the state of one grid cell.
    pub fn day_cell(&self, day: NaiveDate) -> DayCell {
        let date = day.and_time(self.date.time());
        let selected = if self.date_range.is_empty() {
            is_same_day(self.date, date)
        } else {
            self.date_range.iter().any(|end| is_same_day(*end, date))
        };
        DayCell {
            date,
            in_same_month: self.in_same_month(date),
            disabled: self.is_disabled_date(date),
            selected,
            in_range: self.in_range(day),
            class_name: self.cell_class_name(date),
            title: format_date(date, &self.locale.formatted_day_pattern, &self.locale),
        }
    }

    fn in_range(&self, day: NaiveDate) -> bool {
        let bounds = self.hover_range.or_else(|| match self.date_range.as_slice() {
            [start, end] => Some((*start, *end)),
            _ => None,
        });
        let Some((a, b)) = bounds else {
            return false;
        };
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        start.date() < day && day < end.date()
    }
}
