//! Header props: titles, toggles and navigation flags.

use chrono::{NaiveDateTime, Timelike};

use crate::{
    format::{FormatCapabilities, TimeColumns, format_date, time_format},
    locale::CalendarLocale,
    predicates::PredicateSet,
    view_state::ViewState,
};

/// Props for the header surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProps {
    /// Show the month title toggle and navigation arrows.
    pub show_date: bool,
    /// The month toggle is available.
    pub show_month: bool,
    /// The time toggle is available.
    pub show_time: bool,
    /// Show the AM/PM switch.
    pub show_meridian: bool,
    /// The month panel is currently open.
    pub month_open: bool,
    /// The time panel is currently open.
    pub time_open: bool,
    /// The page date's time is unavailable.
    pub disabled_time: bool,
    /// The backward arrow is disabled.
    pub disabled_backward: bool,
    /// The forward arrow is disabled.
    pub disabled_forward: bool,
    /// Month title, formatted with the locale's month pattern.
    pub date_title: String,
    /// Time title; empty when the format has no time.
    pub time_title: String,
    /// Period label shown next to the time title in meridian mode.
    pub meridian: Option<String>,
}

pub(crate) struct HeaderInput<'a> {
    pub(crate) page_date: NaiveDateTime,
    pub(crate) format: &'a str,
    pub(crate) capabilities: FormatCapabilities,
    pub(crate) state: ViewState,
    pub(crate) show_meridian: bool,
    pub(crate) disabled_backward: bool,
    pub(crate) disabled_forward: bool,
    pub(crate) predicates: &'a PredicateSet,
    pub(crate) locale: &'a CalendarLocale,
}

impl HeaderProps {
    pub(crate) fn build(input: HeaderInput<'_>) -> Self {
        let HeaderInput {
            page_date,
            format,
            capabilities,
            state,
            show_meridian,
            disabled_backward,
            disabled_forward,
            predicates,
            locale,
        } = input;

        let date_title = if capabilities.has_date || capabilities.has_month {
            format_date(page_date, &locale.formatted_month_pattern, locale)
        } else {
            String::new()
        };
        let (time_title, meridian) = if capabilities.has_time {
            let pattern = time_format(TimeColumns::from_format(format), show_meridian);
            let meridian = show_meridian.then(|| locale.meridian(page_date.hour()).to_string());
            (format_date(page_date, &pattern, locale), meridian)
        } else {
            (String::new(), None)
        };

        Self {
            show_date: capabilities.has_date,
            show_month: capabilities.has_month,
            show_time: capabilities.has_time,
            show_meridian,
            month_open: state.is_month_open(),
            time_open: state.is_time_open(),
            disabled_time: predicates.is_time_disabled(page_date),
            disabled_backward,
            disabled_forward,
            date_title,
            time_title,
            meridian,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        date::try_page_date,
        predicates::{PredicateOptions, TimePredicate},
    };

    fn header(format: &str, show_meridian: bool, predicates: &PredicateSet) -> HeaderProps {
        let locale = CalendarLocale::default();
        HeaderProps::build(HeaderInput {
            page_date: try_page_date(2024, 3, 5, 8, 4, 30).expect("valid test date"),
            format,
            capabilities: FormatCapabilities::from_format(format),
            state: ViewState::Collapsed,
            show_meridian,
            disabled_backward: false,
            disabled_forward: true,
            predicates,
            locale: &locale,
        })
    }

    #[test]
    fn titles_follow_capabilities() {
        let predicates = PredicateSet::default();
        let props = header("yyyy-MM-dd HH:mm", false, &predicates);
        assert_eq!(props.date_title, "Mar 2024");
        assert_eq!(props.time_title, "08:04");
        assert_eq!(props.meridian, None);
        assert!(props.disabled_forward && !props.disabled_backward);

        let time_only = header("hh:mm:ss a", true, &predicates);
        assert!(time_only.date_title.is_empty());
        assert_eq!(time_only.time_title, "08:04:30");
        assert_eq!(time_only.meridian.as_deref(), Some("AM"));
    }

    #[test]
    fn disabled_time_is_evaluated_for_the_page_date() {
        let predicates = PredicateSet::compose(
            &PredicateOptions::default().disabled_hours(TimePredicate::new(|(hour, _)| hour < 9)),
        );
        assert!(header("HH:mm", false, &predicates).disabled_time);
    }
}
