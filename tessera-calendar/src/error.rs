//! Errors returned by the fallible date helpers.
//!
//! The render path never fails; these errors only surface from explicit
//! conversions such as [`crate::date::try_page_date`] and
//! [`crate::format::parse_date`].

use thiserror::Error;

/// Errors produced while building or parsing a page date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The year/month/day combination does not exist in the Gregorian calendar.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component (1-12).
        month: u32,
        /// Day component (1-31).
        day: u32,
    },
    /// The hour/minute/second combination is not a valid time of day.
    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        /// Hour component (0-23).
        hour: u32,
        /// Minute component (0-59).
        minute: u32,
        /// Second component (0-59).
        second: u32,
    },
    /// The input text does not match the format.
    #[error("failed to parse `{input}` with format `{format}`: {reason}")]
    Parse {
        /// Text that was parsed.
        input: String,
        /// Format the text was parsed against.
        format: String,
        /// Short description of the mismatch.
        reason: &'static str,
    },
}

/// Result alias for calendar helpers.
pub type Result<T, E = CalendarError> = std::result::Result<T, E>;
