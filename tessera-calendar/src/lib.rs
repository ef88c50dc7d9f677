//! Headless calendar orchestration for tessera date and time pickers.
//!
//! A [`Calendar`] combines a picker's format string, its page date and its
//! disabled/hidden rules into a [`CalendarFrame`]: props for the header, the
//! day grid, the month panel and the time panel, plus a [`CalendarContext`]
//! they all share. Rendering the frame is left to a [`CalendarSurface`].
//!
//! # Example
//!
//! ```
//! use tessera_calendar::{Calendar, CalendarArgs, ViewState, try_page_date};
//!
//! let args = CalendarArgs::default()
//!     .format("yyyy-MM-dd HH:mm")
//!     .calendar_date(try_page_date(2024, 5, 17, 9, 30, 0).expect("valid date"))
//!     .disabled_hours(|hour, _| hour < 8);
//! let calendar = Calendar::new(&args);
//!
//! assert!(calendar.toggle_time_dropdown(&args));
//! assert_eq!(calendar.view_state(), ViewState::TimeOpen);
//!
//! let frame = calendar.render(&args);
//! assert!(frame.view.show_date && frame.view.show_time);
//! assert_eq!(frame.class_name(), "calendar calendar-time-view");
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod context;
pub mod date;
pub mod error;
pub mod format;
pub mod grid;
pub mod header;
pub mod locale;
pub mod month_dropdown;
pub mod predicates;
pub mod prop;
pub mod time_dropdown;
pub mod view_state;

pub use calendar::{
    Calendar, CalendarArgs, CalendarFrame, CalendarSurface, CollapseButton, EffectiveView,
};
pub use context::{CalendarContext, DateCallback, DateRange, DayCell, InputSource};
pub use date::{add_months, resolve_page_date, try_page_date};
pub use error::{CalendarError, Result};
pub use format::{FormatCapabilities, TimeColumns, format_date, parse_date};
pub use grid::{CalendarBodyProps, Week};
pub use header::HeaderProps;
pub use locale::CalendarLocale;
pub use month_dropdown::{MonthCell, MonthDropdownProps, MonthRow};
pub use predicates::{DatePredicate, PredicateOptions, PredicateSet, TimePredicate};
pub use prop::{CallbackWith, Predicate, Slot};
pub use time_dropdown::{TimeColumn, TimeDropdownProps, TimeOption, TimeUnit};
pub use view_state::{CalendarViewState, ViewState, ViewStateHandle};
