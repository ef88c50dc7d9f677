//! Which panel the calendar currently exhibits.
//!
//! ## Usage
//!
//! The calendar owns a [`ViewStateHandle`]; surfaces never mutate it directly,
//! they go through the calendar's interaction methods.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

/// The active panel. Exactly one variant is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    /// Base view; no dropdown panel is open.
    #[default]
    Collapsed,
    /// The month panel is open.
    MonthOpen,
    /// The time panel is open.
    TimeOpen,
}

impl ViewState {
    /// Returns true when the month panel is open.
    pub fn is_month_open(self) -> bool {
        self == ViewState::MonthOpen
    }

    /// Returns true when the time panel is open.
    pub fn is_time_open(self) -> bool {
        self == ViewState::TimeOpen
    }
}

/// View state machine.
///
/// Every transition is total; opening one panel implicitly closes the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarViewState {
    state: ViewState,
}

impl CalendarViewState {
    /// Creates a state machine starting at `initial`, or collapsed.
    pub fn new(initial: Option<ViewState>) -> Self {
        Self {
            state: initial.unwrap_or_default(),
        }
    }

    /// Returns the active state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Closes any open panel.
    pub fn reset(&mut self) {
        self.transition(ViewState::Collapsed);
    }

    /// Opens the month panel.
    pub fn open_month(&mut self) {
        self.transition(ViewState::MonthOpen);
    }

    /// Opens the time panel.
    pub fn open_time(&mut self) {
        self.transition(ViewState::TimeOpen);
    }

    /// Opens the month panel, or collapses it if it is already open.
    ///
    /// Returns whether the month panel is open afterwards.
    pub fn toggle_month(&mut self) -> bool {
        if self.state.is_month_open() {
            self.reset();
        } else {
            self.open_month();
        }
        self.state.is_month_open()
    }

    /// Opens the time panel, or collapses it if it is already open.
    ///
    /// Returns whether the time panel is open afterwards.
    pub fn toggle_time(&mut self) -> bool {
        if self.state.is_time_open() {
            self.reset();
        } else {
            self.open_time();
        }
        self.state.is_time_open()
    }

    fn transition(&mut self, next: ViewState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "calendar view state changed");
            self.state = next;
        }
    }
}

/// Shared handle to a [`CalendarViewState`].
///
/// Clones point at the same state machine, so bound callbacks handed to
/// surfaces can collapse the calendar. Compares by identity.
#[derive(Clone, Default)]
pub struct ViewStateHandle {
    inner: Arc<RwLock<CalendarViewState>>,
}

impl ViewStateHandle {
    /// Creates a handle around a new state machine.
    pub fn new(initial: Option<ViewState>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CalendarViewState::new(initial))),
        }
    }

    /// Execute a closure with a shared reference to the state machine.
    pub fn with<R>(&self, f: impl FnOnce(&CalendarViewState) -> R) -> R {
        f(&self.inner.read())
    }

    /// Execute a closure with a mutable reference to the state machine.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut CalendarViewState) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Returns the active state.
    pub fn get(&self) -> ViewState {
        self.with(CalendarViewState::state)
    }

    /// See [`CalendarViewState::reset`].
    pub fn reset(&self) {
        self.with_mut(CalendarViewState::reset);
    }

    /// See [`CalendarViewState::open_month`].
    pub fn open_month(&self) {
        self.with_mut(CalendarViewState::open_month);
    }

    /// See [`CalendarViewState::open_time`].
    pub fn open_time(&self) {
        self.with_mut(CalendarViewState::open_time);
    }

    /// See [`CalendarViewState::toggle_month`].
    pub fn toggle_month(&self) -> bool {
        self.with_mut(CalendarViewState::toggle_month)
    }

    /// See [`CalendarViewState::toggle_time`].
    pub fn toggle_time(&self) -> bool {
        self.with_mut(CalendarViewState::toggle_time)
    }
}

impl PartialEq for ViewStateHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ViewStateHandle {}

impl std::fmt::Debug for ViewStateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ViewStateHandle").field(&self.get()).finish()
    }
}
