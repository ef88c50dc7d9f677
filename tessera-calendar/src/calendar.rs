//! Calendar orchestrator.
//!
//! ## Usage
//!
//! Create a [`Calendar`] once per mounted picker, call [`Calendar::render`]
//! with the current [`CalendarArgs`] on every pass, and route user
//! interactions through the calendar's methods. The page date stays owned by
//! the caller: navigation only proposes the next value through callbacks.

use std::sync::Arc;

use chrono::NaiveDateTime;
use closure::closure;
use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    context::{CalendarContext, DateCallback, DateRange, InputSource},
    date::{add_months, resolve_page_date, toggle_meridian},
    format::{FormatCapabilities, TimeColumns},
    grid::{CalendarBodyProps, month_weeks},
    header::{HeaderInput, HeaderProps},
    locale::CalendarLocale,
    month_dropdown::MonthDropdownProps,
    predicates::{DatePredicate, PredicateOptions, PredicateSet, TimePredicate},
    prop::CallbackWith,
    time_dropdown::TimeDropdownProps,
    view_state::{ViewState, ViewStateHandle},
};

/// Configuration for [`Calendar`].
///
/// Callbacks and rules are optional; an absent callback makes the matching
/// interaction silent and an absent rule disables or hides nothing.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct CalendarArgs {
    /// Format string deciding which units can be picked.
    #[setters(into)]
    pub format: String,
    /// Page date; the current time is used when absent.
    #[setters(strip_option)]
    pub calendar_date: Option<NaiveDateTime>,
    /// View state applied when the calendar is created.
    #[setters(strip_option)]
    pub default_state: Option<ViewState>,
    /// Selected range endpoints for range pickers.
    #[setters(into)]
    pub date_range: DateRange,
    /// Range under the pointer while picking a range.
    #[setters(strip_option)]
    pub hover_range_value: Option<(NaiveDateTime, NaiveDateTime)>,
    /// Disabled and hidden rules.
    pub predicates: PredicateOptions,
    /// Locale strings.
    #[setters(into)]
    pub locale: Arc<CalendarLocale>,
    /// Weeks start on Monday.
    pub iso_week: bool,
    /// Show week numbers next to the grid.
    pub show_week_numbers: bool,
    /// Years listed back from the current year in the month panel.
    #[setters(strip_option)]
    pub limit_start_year: Option<u32>,
    /// Years listed from the current year onwards in the month panel.
    #[setters(strip_option)]
    pub limit_end_year: Option<u32>,
    /// Use a 12-hour clock.
    pub show_meridian: bool,
    /// Prefix of the generated class names.
    #[setters(into)]
    pub class_prefix: String,
    /// Extra class for the container.
    #[setters(strip_option, into)]
    pub class_name: Option<String>,
    /// Id of the element that opened the calendar.
    #[setters(strip_option, into)]
    pub target_id: Option<String>,
    /// Rendered inline rather than in a popup.
    pub inline: bool,
    /// Disable the backward arrow.
    pub disabled_backward: bool,
    /// Disable the forward arrow.
    pub disabled_forward: bool,
    /// Month picked in the month panel.
    #[setters(skip)]
    pub on_change_month: Option<DateCallback>,
    /// Time picked in the time panel.
    #[setters(skip)]
    pub on_change_time: Option<DateCallback>,
    /// Day picked in the grid.
    #[setters(skip)]
    pub on_select: Option<DateCallback>,
    /// Proposed page date after moving one month forward.
    #[setters(skip)]
    pub on_move_forward: Option<CallbackWith<NaiveDateTime>>,
    /// Proposed page date after moving one month backward.
    #[setters(skip)]
    pub on_move_backward: Option<CallbackWith<NaiveDateTime>>,
    /// Month panel opened (`true`) or closed (`false`).
    #[setters(skip)]
    pub on_toggle_month_dropdown: Option<CallbackWith<bool>>,
    /// Time panel opened (`true`) or closed (`false`).
    #[setters(skip)]
    pub on_toggle_time_dropdown: Option<CallbackWith<bool>>,
    /// Proposed page date after switching AM/PM.
    #[setters(skip)]
    pub on_toggle_meridian: Option<CallbackWith<NaiveDateTime>>,
    /// Pointer entered a day cell.
    #[setters(skip)]
    pub on_mouse_move: Option<CallbackWith<NaiveDateTime>>,
    /// Extra class for a day cell.
    #[setters(skip)]
    pub cell_class_name: Option<CallbackWith<NaiveDateTime, Option<String>>>,
}

impl Default for CalendarArgs {
    fn default() -> Self {
        Self {
            format: "yyyy-MM-dd".to_string(),
            calendar_date: None,
            default_state: None,
            date_range: DateRange::new(),
            hover_range_value: None,
            predicates: PredicateOptions::default(),
            locale: Arc::new(CalendarLocale::default()),
            iso_week: false,
            show_week_numbers: false,
            limit_start_year: None,
            limit_end_year: None,
            show_meridian: false,
            class_prefix: "calendar".to_string(),
            class_name: None,
            target_id: None,
            inline: false,
            disabled_backward: false,
            disabled_forward: false,
            on_change_month: None,
            on_change_time: None,
            on_select: None,
            on_move_forward: None,
            on_move_backward: None,
            on_toggle_month_dropdown: None,
            on_toggle_time_dropdown: None,
            on_toggle_meridian: None,
            on_mouse_move: None,
            cell_class_name: None,
        }
    }
}

fn date_callback<F>(f: F) -> DateCallback
where
    F: Fn(NaiveDateTime, InputSource) + Send + Sync + 'static,
{
    CallbackWith::new(move |(date, source): (NaiveDateTime, InputSource)| f(date, source))
}

fn time_predicate<F>(f: F) -> TimePredicate
where
    F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
{
    TimePredicate::new(move |(value, date): (u32, NaiveDateTime)| f(value, date))
}

impl CalendarArgs {
    /// Sets the month change handler.
    pub fn on_change_month<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime, InputSource) + Send + Sync + 'static,
    {
        self.on_change_month = Some(date_callback(f));
        self
    }

    /// Sets the time change handler.
    pub fn on_change_time<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime, InputSource) + Send + Sync + 'static,
    {
        self.on_change_time = Some(date_callback(f));
        self
    }

    /// Sets the day selection handler.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime, InputSource) + Send + Sync + 'static,
    {
        self.on_select = Some(date_callback(f));
        self
    }

    /// Sets the forward navigation handler.
    pub fn on_move_forward<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime) + Send + Sync + 'static,
    {
        self.on_move_forward = Some(CallbackWith::new(f));
        self
    }

    /// Sets the backward navigation handler.
    pub fn on_move_backward<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime) + Send + Sync + 'static,
    {
        self.on_move_backward = Some(CallbackWith::new(f));
        self
    }

    /// Sets the month dropdown toggle handler.
    pub fn on_toggle_month_dropdown<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle_month_dropdown = Some(CallbackWith::new(f));
        self
    }

    /// Sets the time dropdown toggle handler.
    pub fn on_toggle_time_dropdown<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle_time_dropdown = Some(CallbackWith::new(f));
        self
    }

    /// Sets the AM/PM switch handler.
    pub fn on_toggle_meridian<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime) + Send + Sync + 'static,
    {
        self.on_toggle_meridian = Some(CallbackWith::new(f));
        self
    }

    /// Sets the cell hover handler.
    pub fn on_mouse_move<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime) + Send + Sync + 'static,
    {
        self.on_mouse_move = Some(CallbackWith::new(f));
        self
    }

    /// Sets the per-cell class hook.
    pub fn cell_class_name<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime) -> Option<String> + Send + Sync + 'static,
    {
        self.cell_class_name = Some(CallbackWith::new(f));
        self
    }

    /// Disables dates matching `f`.
    pub fn disabled_date<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.disabled_date = Some(DatePredicate::new(f));
        self
    }

    /// Disables hours matching `f(hour, page_date)`.
    pub fn disabled_hours<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.disabled_hours = Some(time_predicate(f));
        self
    }

    /// Disables minutes matching `f(minute, page_date)`.
    pub fn disabled_minutes<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.disabled_minutes = Some(time_predicate(f));
        self
    }

    /// Disables seconds matching `f(second, page_date)`.
    pub fn disabled_seconds<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.disabled_seconds = Some(time_predicate(f));
        self
    }

    /// Hides hours matching `f(hour, page_date)`.
    pub fn hide_hours<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.hide_hours = Some(time_predicate(f));
        self
    }

    /// Hides minutes matching `f(minute, page_date)`.
    pub fn hide_minutes<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.hide_minutes = Some(time_predicate(f));
        self
    }

    /// Hides seconds matching `f(second, page_date)`.
    pub fn hide_seconds<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.predicates.hide_seconds = Some(time_predicate(f));
        self
    }
}

/// Which parts of the calendar are exhibited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectiveView {
    /// The day grid is shown.
    pub show_date: bool,
    /// The month panel is shown.
    pub show_month: bool,
    /// The time panel is shown.
    pub show_time: bool,
}

impl EffectiveView {
    /// Combines the format's capabilities with the view state.
    ///
    /// A single-unit format always shows its unit. The flags follow the view
    /// state even for units the format lacks; only the panels themselves are
    /// gated by the format.
    pub fn resolve(capabilities: FormatCapabilities, state: ViewState) -> Self {
        Self {
            show_date: capabilities.has_date,
            show_month: state.is_month_open() || capabilities.only_month(),
            show_time: state.is_time_open() || capabilities.only_time(),
        }
    }

    /// A panel covers the day grid, so collapsing leads somewhere.
    pub fn shows_collapse(&self) -> bool {
        (self.show_month || self.show_time) && self.show_date
    }
}

/// Props for the collapse affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseButton {
    /// Accessible label.
    pub aria_label: &'static str,
}

impl CollapseButton {
    fn for_view(view: EffectiveView) -> Self {
        let aria_label = if view.show_month {
            "Collapse month view"
        } else {
            "Collapse time view"
        };
        Self { aria_label }
    }
}

/// External renderer for the calendar's child surfaces.
///
/// Every method receives the frame's shared context. The default methods
/// render nothing.
pub trait CalendarSurface {
    /// Renders the header.
    fn header(&mut self, _context: &CalendarContext, _props: &HeaderProps) {}

    /// Renders the day grid.
    fn body(&mut self, _context: &CalendarContext, _props: &CalendarBodyProps) {}

    /// Renders the month panel.
    fn month_dropdown(&mut self, _context: &CalendarContext, _props: &MonthDropdownProps) {}

    /// Renders the time panel.
    fn time_dropdown(&mut self, _context: &CalendarContext, _props: &TimeDropdownProps) {}

    /// Renders the collapse affordance.
    fn collapse_button(&mut self, _context: &CalendarContext, _props: &CollapseButton) {}
}

/// Everything one render pass derived from the args and view state.
#[derive(Debug, Clone)]
pub struct CalendarFrame {
    /// Units the format encodes.
    pub capabilities: FormatCapabilities,
    /// View state at render time.
    pub state: ViewState,
    /// Exhibited parts.
    pub view: EffectiveView,
    /// Container classes.
    pub classes: SmallVec<[String; 5]>,
    /// Header props.
    pub header: HeaderProps,
    /// Day grid props; present when the format has a date.
    pub body: Option<CalendarBodyProps>,
    /// Month panel props; present when the format has a month.
    pub month_dropdown: Option<MonthDropdownProps>,
    /// Time panel props; present when the format has a time.
    pub time_dropdown: Option<TimeDropdownProps>,
    /// Collapse affordance, present only when collapsing returns to the grid.
    pub collapse: Option<CollapseButton>,
    /// Context shared with every surface.
    pub context: CalendarContext,
}

impl CalendarFrame {
    /// Resolved page date of this frame.
    pub fn page_date(&self) -> NaiveDateTime {
        self.context.date()
    }

    /// Container classes joined by spaces.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Hands each present part to `surface`: header, grid, month panel, time
    /// panel, then the collapse affordance.
    pub fn render_with<S: CalendarSurface + ?Sized>(&self, surface: &mut S) {
        let context = &self.context;
        surface.header(context, &self.header);
        if let Some(body) = &self.body {
            surface.body(context, body);
        }
        if let Some(month_dropdown) = &self.month_dropdown {
            surface.month_dropdown(context, month_dropdown);
        }
        if let Some(time_dropdown) = &self.time_dropdown {
            surface.time_dropdown(context, time_dropdown);
        }
        if let Some(collapse) = &self.collapse {
            surface.collapse_button(context, collapse);
        }
    }
}

/// Calendar orchestrator.
///
/// Owns only the view state. Every other input arrives through
/// [`CalendarArgs`] on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    view_state: ViewStateHandle,
}

impl Calendar {
    /// Mounts a calendar, starting from `args.default_state` or collapsed.
    pub fn new(args: &CalendarArgs) -> Self {
        Self::with_state(ViewStateHandle::new(args.default_state))
    }

    /// Mounts a calendar driven by an external view state.
    pub fn with_state(view_state: ViewStateHandle) -> Self {
        Self { view_state }
    }

    /// Current view state.
    pub fn view_state(&self) -> ViewState {
        self.view_state.get()
    }

    /// Handle to the view state machine.
    pub fn state_handle(&self) -> &ViewStateHandle {
        &self.view_state
    }

    /// Derives a frame from the args and the current view state.
    #[tracing::instrument(level = "trace", skip(self, args), fields(format = %args.format))]
    pub fn render(&self, args: &CalendarArgs) -> CalendarFrame {
        let page_date = resolve_page_date(args.calendar_date);
        let capabilities = FormatCapabilities::from_format(&args.format);
        let state = self.view_state.get();
        let view = EffectiveView::resolve(capabilities, state);
        let predicates = PredicateSet::compose(&args.predicates);

        if capabilities.is_empty() {
            debug!(format = %args.format, "format encodes no calendar unit, rendering header only");
        }

        let header = HeaderProps::build(HeaderInput {
            page_date,
            format: &args.format,
            capabilities,
            state,
            show_meridian: args.show_meridian,
            disabled_backward: args.disabled_backward,
            disabled_forward: args.disabled_forward,
            predicates: &predicates,
            locale: &args.locale,
        });
        let body = capabilities.has_date.then(|| CalendarBodyProps {
            weeks: month_weeks(page_date.date(), args.iso_week),
            show_week_numbers: args.show_week_numbers,
            iso_week: args.iso_week,
        });
        let month_dropdown = capabilities.has_month.then(|| MonthDropdownProps {
            show: view.show_month,
            limit_start_year: args.limit_start_year,
            limit_end_year: args.limit_end_year,
            page_date,
            disabled_date: predicates.disabled_date.clone(),
        });
        let time_dropdown = capabilities.has_time.then(|| TimeDropdownProps {
            show: view.show_time,
            show_meridian: args.show_meridian,
            columns: TimeColumns::from_format(&args.format),
            page_date,
            predicates: predicates.clone(),
        });
        let collapse = view.shows_collapse().then(|| CollapseButton::for_view(view));

        let context = CalendarContext {
            date: page_date,
            date_range: args.date_range.clone(),
            hover_range: args.hover_range_value,
            disabled_date: predicates.disabled_date,
            format: Arc::from(args.format.as_str()),
            iso_week: args.iso_week,
            show_week_numbers: args.show_week_numbers,
            inline: args.inline,
            target_id: args.target_id.clone(),
            locale: Arc::clone(&args.locale),
            on_change_month: self.bound_change_month(args),
            on_change_time: args.on_change_time.clone(),
            on_select: args.on_select.clone(),
            on_mouse_move: args.on_mouse_move.clone(),
            cell_class_name: args.cell_class_name.clone(),
        };

        CalendarFrame {
            capabilities,
            state,
            view,
            classes: class_list(args, view),
            header,
            body,
            month_dropdown,
            time_dropdown,
            collapse,
            context,
        }
    }

    /// Proposes the page date one month later and reports it.
    pub fn move_forward(&self, args: &CalendarArgs) -> NaiveDateTime {
        let next = add_months(resolve_page_date(args.calendar_date), 1);
        debug!(%next, "calendar moved forward");
        if let Some(on_move_forward) = &args.on_move_forward {
            on_move_forward.call(next);
        }
        next
    }

    /// Proposes the page date one month earlier and reports it.
    pub fn move_backward(&self, args: &CalendarArgs) -> NaiveDateTime {
        let next = add_months(resolve_page_date(args.calendar_date), -1);
        debug!(%next, "calendar moved backward");
        if let Some(on_move_backward) = &args.on_move_backward {
            on_move_backward.call(next);
        }
        next
    }

    /// Opens or closes the month panel, then reports the new open flag.
    pub fn toggle_month_dropdown(&self, args: &CalendarArgs) -> bool {
        let open = self.view_state.toggle_month();
        if let Some(on_toggle) = &args.on_toggle_month_dropdown {
            on_toggle.call(open);
        }
        open
    }

    /// Opens or closes the time panel, then reports the new open flag.
    pub fn toggle_time_dropdown(&self, args: &CalendarArgs) -> bool {
        let open = self.view_state.toggle_time();
        if let Some(on_toggle) = &args.on_toggle_time_dropdown {
            on_toggle.call(open);
        }
        open
    }

    /// Collapses any open panel.
    pub fn close_dropdown(&self) {
        self.view_state.reset();
    }

    /// Handles a month picked in the month panel: collapses, then reports.
    pub fn change_month(&self, args: &CalendarArgs, date: NaiveDateTime, source: InputSource) {
        self.bound_change_month(args).call((date, source));
    }

    /// Proposes the page date with AM and PM swapped and reports it.
    pub fn toggle_meridian(&self, args: &CalendarArgs) -> NaiveDateTime {
        let next = toggle_meridian(resolve_page_date(args.calendar_date));
        debug!(%next, "calendar meridian toggled");
        if let Some(on_toggle_meridian) = &args.on_toggle_meridian {
            on_toggle_meridian.call(next);
        }
        next
    }

    fn bound_change_month(&self, args: &CalendarArgs) -> DateCallback {
        let view_state = self.view_state.clone();
        CallbackWith::new(closure!(clone args.on_change_month,
            |(date, source): (NaiveDateTime, InputSource)| {
                view_state.reset();
                debug!(%date, ?source, "calendar month changed");
                if let Some(on_change_month) = &on_change_month {
                    on_change_month.call((date, source));
                }
            }
        ))
    }
}

fn class_list(args: &CalendarArgs, view: EffectiveView) -> SmallVec<[String; 5]> {
    let prefix = &args.class_prefix;
    let mut classes = SmallVec::new();
    if let Some(class_name) = &args.class_name {
        classes.push(class_name.clone());
    }
    classes.push(prefix.clone());
    if view.show_time {
        classes.push(format!("{prefix}-time-view"));
    }
    if view.show_month {
        classes.push(format!("{prefix}-month-view"));
    }
    if args.show_week_numbers {
        classes.push(format!("{prefix}-show-week-numbers"));
    }
    classes
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use parking_lot::Mutex;
    use tracing_subscriber::EnvFilter;

    use super::*;
    use crate::date::{is_same_month, now, try_page_date};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
            )
            .with_test_writer()
            .try_init();
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        try_page_date(year, month, day, hour, minute, 0).expect("valid test date")
    }

    fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (log.clone(), log)
    }

    #[test]
    fn date_format_month_toggle_round_trip() {
        init_tracing();
        let calendar_handle = ViewStateHandle::new(None);
        let observed = calendar_handle.clone();
        let (log, sink) = recorder();
        let args = CalendarArgs::default()
            .format("yyyy-MM-dd")
            .calendar_date(at(2024, 5, 17, 10, 0))
            .on_toggle_month_dropdown(move |open| sink.lock().push((open, observed.get())));
        let calendar = Calendar::with_state(calendar_handle);

        let frame = calendar.render(&args);
        assert!(!frame.view.show_month && !frame.view.show_time);
        assert!(frame.collapse.is_none());

        assert!(calendar.toggle_month_dropdown(&args));
        let frame = calendar.render(&args);
        assert_eq!(frame.state, ViewState::MonthOpen);
        assert!(frame.view.show_month);
        assert!(frame.month_dropdown.as_ref().is_some_and(|month| month.show));

        assert!(!calendar.toggle_month_dropdown(&args));
        assert_eq!(calendar.view_state(), ViewState::Collapsed);
        assert!(!calendar.render(&args).view.show_month);

        assert_eq!(
            *log.lock(),
            vec![(true, ViewState::MonthOpen), (false, ViewState::Collapsed)]
        );
    }

    #[test]
    fn time_only_format_always_shows_time() {
        let args = CalendarArgs::default().format("HH:mm");
        for default_state in [
            ViewState::Collapsed,
            ViewState::MonthOpen,
            ViewState::TimeOpen,
        ] {
            let calendar = Calendar::new(&args.clone().default_state(default_state));
            for _ in 0..3 {
                let frame = calendar.render(&args);
                assert!(frame.view.show_time);
                assert!(!frame.view.show_date);
                assert_eq!(frame.view.show_month, frame.state.is_month_open());
                assert!(frame.collapse.is_none());
                assert!(frame.body.is_none() && frame.month_dropdown.is_none());
                assert!(frame.time_dropdown.as_ref().is_some_and(|time| time.show));
                calendar.toggle_time_dropdown(&args);
            }
        }
    }

    #[test]
    fn month_only_format_always_shows_month() {
        let args = CalendarArgs::default().format("yyyy-MM");
        let calendar = Calendar::new(&args);
        calendar.toggle_month_dropdown(&args);
        calendar.toggle_month_dropdown(&args);
        let frame = calendar.render(&args);
        assert!(frame.view.show_month);
        assert!(frame.collapse.is_none());
    }

    #[test]
    fn picking_a_month_collapses_then_reports_once() {
        let (log, sink) = recorder();
        let handle = ViewStateHandle::new(Some(ViewState::MonthOpen));
        let observed = handle.clone();
        let args = CalendarArgs::default()
            .calendar_date(at(2024, 5, 17, 10, 0))
            .on_change_month(move |date, source| sink.lock().push((date, source, observed.get())));
        let calendar = Calendar::with_state(handle);
        let picked = at(2023, 2, 17, 10, 0);

        calendar.change_month(&args, picked, InputSource::Pointer);

        assert_eq!(calendar.view_state(), ViewState::Collapsed);
        assert_eq!(
            *log.lock(),
            vec![(picked, InputSource::Pointer, ViewState::Collapsed)]
        );
    }

    #[test]
    fn context_month_change_collapses_the_calendar() {
        let (log, sink) = recorder();
        let args = CalendarArgs::default()
            .default_state(ViewState::MonthOpen)
            .calendar_date(at(2024, 5, 17, 10, 0))
            .on_change_month(move |date, _| sink.lock().push(date));
        let calendar = Calendar::new(&args);
        let frame = calendar.render(&args);
        let month_dropdown = frame.month_dropdown.as_ref().expect("month panel props");
        let picked = month_dropdown.date_for(2024, 8);

        frame.context.change_month(picked, InputSource::Keyboard);

        assert_eq!(calendar.view_state(), ViewState::Collapsed);
        assert_eq!(*log.lock(), vec![at(2024, 8, 17, 10, 0)]);
    }

    #[test]
    fn navigation_proposes_without_mutating() {
        init_tracing();
        let (log, sink) = recorder();
        let back_sink = sink.clone();
        let args = CalendarArgs::default()
            .calendar_date(at(2024, 1, 31, 18, 45))
            .on_move_forward(move |date| sink.lock().push(("forward", date)))
            .on_move_backward(move |date| back_sink.lock().push(("backward", date)));
        let calendar = Calendar::new(&args);

        let forward = calendar.move_forward(&args);
        assert_eq!(forward, at(2024, 2, 29, 18, 45));
        assert_eq!(args.calendar_date, Some(at(2024, 1, 31, 18, 45)));

        let back = calendar.move_backward(&args.clone().calendar_date(forward));
        assert_eq!(back, at(2024, 1, 29, 18, 45));
        assert!(is_same_month(back, at(2024, 1, 31, 18, 45)));

        assert_eq!(*log.lock(), vec![("forward", forward), ("backward", back)]);
    }

    #[test]
    fn missing_callbacks_are_silent() {
        let args = CalendarArgs::default().format("yyyy-MM-dd HH:mm");
        let calendar = Calendar::new(&args);
        calendar.move_forward(&args);
        calendar.move_backward(&args);
        assert!(calendar.toggle_time_dropdown(&args));
        calendar.change_month(&args, at(2024, 1, 1, 0, 0), InputSource::Programmatic);
        calendar.toggle_meridian(&args);
        let frame = calendar.render(&args);
        frame.context.select(at(2024, 1, 2, 0, 0), InputSource::Pointer);
        frame.context.mouse_move(at(2024, 1, 3, 0, 0));
        assert_eq!(calendar.view_state(), ViewState::Collapsed);
    }

    #[test]
    fn absent_page_date_renders_now() {
        let args = CalendarArgs::default();
        let before = now();
        let frame = Calendar::new(&args).render(&args);
        assert!(frame.page_date() >= before && frame.page_date() <= now());
    }

    #[test]
    fn open_state_without_format_unit_keeps_flags_but_no_panel() {
        let args = CalendarArgs::default()
            .format("yyyy-MM-dd")
            .default_state(ViewState::TimeOpen);
        let frame = Calendar::new(&args).render(&args);
        assert_eq!(frame.state, ViewState::TimeOpen);
        assert!(frame.view.show_time);
        assert!(frame.time_dropdown.is_none());
        assert_eq!(
            frame.collapse.as_ref().map(|button| button.aria_label),
            Some("Collapse time view")
        );
        assert_eq!(frame.class_name(), "calendar calendar-time-view");

        let args = args.format("HH:mm").default_state(ViewState::MonthOpen);
        let frame = Calendar::new(&args).render(&args);
        assert!(frame.view.show_month && frame.view.show_time);
        assert!(frame.month_dropdown.is_none());
        assert!(frame.collapse.is_none());
    }

    #[test]
    fn collapse_affordance_labels_the_open_panel() {
        let args = CalendarArgs::default().format("yyyy-MM-dd HH:mm:ss");
        let calendar = Calendar::new(&args);

        calendar.toggle_time_dropdown(&args);
        let frame = calendar.render(&args);
        assert_eq!(
            frame.collapse.as_ref().map(|button| button.aria_label),
            Some("Collapse time view")
        );

        calendar.toggle_month_dropdown(&args);
        let frame = calendar.render(&args);
        assert!(!frame.view.show_time);
        assert_eq!(
            frame.collapse.as_ref().map(|button| button.aria_label),
            Some("Collapse month view")
        );

        calendar.close_dropdown();
        assert!(calendar.render(&args).collapse.is_none());
    }

    #[test]
    fn classes_reflect_view_flags() {
        let args = CalendarArgs::default()
            .format("yyyy-MM-dd HH:mm")
            .class_name("booking")
            .show_week_numbers(true)
            .default_state(ViewState::MonthOpen);
        let frame = Calendar::new(&args).render(&args);
        assert_eq!(
            frame.class_name(),
            "booking calendar calendar-month-view calendar-show-week-numbers"
        );

        let args = CalendarArgs::default().format("HH:mm").class_prefix("rs-calendar");
        let frame = Calendar::new(&args).render(&args);
        assert_eq!(frame.class_name(), "rs-calendar rs-calendar-time-view");
    }

    #[test]
    fn tokenless_format_renders_header_only() {
        #[derive(Default)]
        struct Visits(Vec<&'static str>);

        impl CalendarSurface for Visits {
            fn header(&mut self, _context: &CalendarContext, _props: &HeaderProps) {
                self.0.push("header");
            }

            fn body(&mut self, _context: &CalendarContext, _props: &CalendarBodyProps) {
                self.0.push("body");
            }
        }

        let args = CalendarArgs::default().format("--");
        let frame = Calendar::new(&args).render(&args);
        assert!(frame.capabilities.is_empty());
        assert_eq!(frame.view, EffectiveView::default());
        let mut visits = Visits::default();
        frame.render_with(&mut visits);
        assert_eq!(visits.0, vec!["header"]);
    }

    #[test]
    fn surfaces_share_one_context() {
        #[derive(Default)]
        struct Recorder {
            calls: Vec<&'static str>,
            dates: Vec<NaiveDateTime>,
        }

        impl CalendarSurface for Recorder {
            fn header(&mut self, context: &CalendarContext, _props: &HeaderProps) {
                self.calls.push("header");
                self.dates.push(context.date());
            }

            fn body(&mut self, context: &CalendarContext, props: &CalendarBodyProps) {
                self.calls.push("body");
                self.dates.push(context.date());
                assert_eq!(props.weeks.len(), 6);
            }

            fn month_dropdown(&mut self, context: &CalendarContext, _props: &MonthDropdownProps) {
                self.calls.push("month");
                self.dates.push(context.date());
            }

            fn time_dropdown(&mut self, context: &CalendarContext, _props: &TimeDropdownProps) {
                self.calls.push("time");
                self.dates.push(context.date());
            }

            fn collapse_button(&mut self, context: &CalendarContext, _props: &CollapseButton) {
                self.calls.push("collapse");
                self.dates.push(context.date());
            }
        }

        let page = at(2024, 7, 4, 12, 0);
        let args = CalendarArgs::default()
            .format("yyyy-MM-dd HH:mm")
            .calendar_date(page)
            .default_state(ViewState::TimeOpen);
        let frame = Calendar::new(&args).render(&args);
        let mut recorder = Recorder::default();
        frame.render_with(&mut recorder);

        assert_eq!(
            recorder.calls,
            vec!["header", "body", "month", "time", "collapse"]
        );
        assert!(recorder.dates.iter().all(|date| *date == page));
    }

    #[test]
    fn time_rules_use_the_rendered_page_date() {
        let args = CalendarArgs::default()
            .format("yyyy-MM-dd HH:mm")
            .disabled_hours(|hour, _| hour < 9);
        let calendar = Calendar::new(&args);

        let early = calendar.render(&args.clone().calendar_date(at(2024, 3, 1, 8, 30)));
        assert!(early.header.disabled_time);

        let late = calendar.render(&args.clone().calendar_date(at(2024, 3, 1, 10, 0)));
        assert!(!late.header.disabled_time);
    }

    #[test]
    fn disabled_dates_reach_grid_and_month_panel() {
        let args = CalendarArgs::default()
            .calendar_date(at(2024, 3, 10, 0, 0))
            .disabled_date(|date| date.month() == 2);
        let frame = Calendar::new(&args).render(&args);
        assert!(frame.context.is_disabled_date(at(2024, 2, 10, 0, 0)));
        assert!(!frame.context.is_disabled_date(at(2024, 3, 10, 0, 0)));
        let month_dropdown = frame.month_dropdown.as_ref().expect("month panel props");
        assert!(month_dropdown.is_month_disabled(2024, 2));
        assert!(!month_dropdown.is_month_disabled(2024, 3));
    }

    #[test]
    fn meridian_toggle_proposes_other_half_of_day() {
        let (log, sink) = recorder();
        let args = CalendarArgs::default()
            .format("yyyy-MM-dd hh:mm a")
            .show_meridian(true)
            .calendar_date(at(2024, 3, 1, 9, 15))
            .on_toggle_meridian(move |date| sink.lock().push(date));
        let calendar = Calendar::new(&args);
        let next = calendar.toggle_meridian(&args);
        assert_eq!(next.hour(), 21);
        assert_eq!(*log.lock(), vec![next]);
        assert_eq!(calendar.render(&args).header.meridian.as_deref(), Some("AM"));
    }

    #[test]
    fn context_carries_pass_through_inputs() {
        let range = (at(2024, 3, 1, 0, 0), at(2024, 3, 9, 0, 0));
        let args = CalendarArgs::default()
            .calendar_date(at(2024, 3, 5, 0, 0))
            .date_range(vec![range.0, range.1])
            .hover_range_value(range)
            .iso_week(true)
            .show_week_numbers(true)
            .target_id("start-date")
            .inline(true)
            .cell_class_name(|date| (date.day() == 5).then(|| "today".to_string()));
        let frame = Calendar::new(&args).render(&args);
        let context = &frame.context;
        assert_eq!(context.date_range(), &[range.0, range.1]);
        assert_eq!(context.hover_range(), Some(range));
        assert!(context.iso_week() && context.inline() && context.show_week_numbers());
        assert_eq!(context.target_id(), Some("start-date"));
        assert_eq!(context.format(), "yyyy-MM-dd");
        assert_eq!(
            context.cell_class_name(at(2024, 3, 5, 0, 0)).as_deref(),
            Some("today")
        );
        let body = frame.body.as_ref().expect("grid props");
        assert!(body.iso_week);
        assert_eq!(body.weeks[0].days[0].weekday(), chrono::Weekday::Mon);
    }
}
