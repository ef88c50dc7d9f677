//! Drives a calendar through a short scripted session and prints each frame
//! as text.
//!
//! Pass a format string as the first argument to try other pickers, e.g.
//! `example "HH:mm:ss"`. Set `RUST_LOG=tessera_calendar=trace` to follow the
//! calendar's transitions.

use std::{fmt::Write as _, sync::Arc};

use chrono::{Datelike, NaiveDateTime, Timelike};
use parking_lot::RwLock;
use tessera_calendar::{
    Calendar, CalendarArgs, CalendarBodyProps, CalendarContext, CalendarSurface, CollapseButton,
    HeaderProps, InputSource, MonthDropdownProps, TimeDropdownProps, TimeUnit, resolve_page_date,
    try_page_date,
};
use tracing::info;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,example=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

#[derive(Default)]
struct TextSurface {
    out: String,
}

impl CalendarSurface for TextSurface {
    fn header(&mut self, _context: &CalendarContext, props: &HeaderProps) {
        let mut line = String::new();
        if props.show_date {
            let back = if props.disabled_backward { " " } else { "<" };
            let forward = if props.disabled_forward { " " } else { ">" };
            let _ = write!(line, "{back} {} {forward}", props.date_title);
        } else if props.show_month {
            let _ = write!(line, "{}", props.date_title);
        }
        if props.show_time {
            let _ = write!(line, "  [{}", props.time_title);
            if let Some(meridian) = &props.meridian {
                let _ = write!(line, " {meridian}");
            }
            line.push(']');
            if props.disabled_time {
                line.push_str(" (unavailable)");
            }
        }
        let _ = writeln!(self.out, "{line}");
    }

    fn body(&mut self, context: &CalendarContext, props: &CalendarBodyProps) {
        let labels = context.locale().weekday_labels(props.iso_week);
        let show_week_numbers = context.show_week_numbers();
        if show_week_numbers {
            self.out.push_str("    ");
        }
        let _ = writeln!(self.out, "{}", labels.map(|label| format!("{label:>3}")).join(""));
        for week in &props.weeks {
            if show_week_numbers {
                let _ = write!(self.out, "{:>3} ", week.number);
            }
            for day in week.days {
                let cell = context.day_cell(day);
                let mark = if cell.selected {
                    '*'
                } else if cell.disabled {
                    'x'
                } else {
                    ' '
                };
                if cell.in_same_month {
                    let _ = write!(self.out, "{:>2}{mark}", day.day());
                } else {
                    self.out.push_str("   ");
                }
            }
            self.out.push('\n');
        }
    }

    fn month_dropdown(&mut self, context: &CalendarContext, props: &MonthDropdownProps) {
        if !props.show {
            return;
        }
        let year = props.page_date.year();
        for row in props.rows().iter().filter(|row| (row.year - year).abs() <= 1) {
            let _ = write!(self.out, "{}:", row.year);
            for cell in row.months {
                let name = context.locale().month_short_name(cell.month);
                let mark = if cell.active {
                    '*'
                } else if cell.disabled {
                    'x'
                } else {
                    ' '
                };
                let _ = write!(self.out, " {name}{mark}");
            }
            self.out.push('\n');
        }
    }

    fn time_dropdown(&mut self, context: &CalendarContext, props: &TimeDropdownProps) {
        if !props.show {
            return;
        }
        for column in props.columns() {
            let unit = column.unit.title(context.locale());
            let values: Vec<String> = column
                .options
                .iter()
                .filter(|option| !option.disabled)
                .map(|option| {
                    if option.active {
                        format!("[{:02}]", option.display)
                    } else {
                        format!("{:02}", option.display)
                    }
                })
                .collect();
            let _ = writeln!(self.out, "{unit:>7}: {}", values.join(" "));
        }
    }

    fn collapse_button(&mut self, _context: &CalendarContext, props: &CollapseButton) {
        let _ = writeln!(self.out, "[{}]", props.aria_label);
    }
}

fn print_frame(step: &str, calendar: &Calendar, args: &CalendarArgs) {
    let frame = calendar.render(args);
    let mut surface = TextSurface::default();
    frame.render_with(&mut surface);
    println!("== {step} ({}) ==", frame.class_name());
    println!("{}", surface.out);
}

fn main() {
    init_tracing();

    let format = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "yyyy-MM-dd HH:mm".to_string());
    let page = Arc::new(RwLock::new(
        try_page_date(2024, 1, 31, 8, 30, 0).unwrap_or_else(|_| resolve_page_date(None)),
    ));
    info!(%format, "starting calendar demo");

    let set_page = |page: &Arc<RwLock<NaiveDateTime>>| {
        let page = Arc::clone(page);
        move |date: NaiveDateTime| *page.write() = date
    };
    let base_args = |date: NaiveDateTime| {
        let on_forward = set_page(&page);
        let on_backward = set_page(&page);
        let on_meridian = set_page(&page);
        let on_month = set_page(&page);
        let on_time = set_page(&page);
        CalendarArgs::default()
            .format(format.clone())
            .calendar_date(date)
            .show_week_numbers(true)
            .disabled_date(|date| date.weekday() == chrono::Weekday::Sun)
            .disabled_hours(|hour, _| !(8..=18).contains(&hour))
            .hide_minutes(|minute, _| minute % 15 != 0)
            .date_range(vec![date])
            .on_move_forward(on_forward)
            .on_move_backward(on_backward)
            .on_toggle_meridian(on_meridian)
            .on_change_month(move |date, _| on_month(date))
            .on_change_time(move |date, _| on_time(date))
            .on_toggle_month_dropdown(|open| info!(open, "month dropdown"))
            .on_toggle_time_dropdown(|open| info!(open, "time dropdown"))
    };

    let args = base_args(*page.read());
    let calendar = Calendar::new(&args);
    print_frame("initial", &calendar, &args);

    calendar.move_forward(&args);
    let args = base_args(*page.read());
    print_frame("next month", &calendar, &args);

    calendar.toggle_month_dropdown(&args);
    print_frame("month panel", &calendar, &args);

    let frame = calendar.render(&args);
    if let Some(month_dropdown) = &frame.month_dropdown {
        let picked = month_dropdown.date_for(2024, 6);
        frame.context.change_month(picked, InputSource::Keyboard);
    }
    let args = base_args(*page.read());
    print_frame("june picked", &calendar, &args);

    calendar.toggle_time_dropdown(&args);
    let frame = calendar.render(&args);
    if let (Some(time_dropdown), true) = (&frame.time_dropdown, frame.view.show_time) {
        let hour = (frame.page_date().hour() + 2) % 24;
        let picked = time_dropdown.date_for(TimeUnit::Hour, hour);
        frame.context.change_time(picked, InputSource::Pointer);
    }
    let args = base_args(*page.read());
    print_frame("time panel", &calendar, &args);

    calendar.close_dropdown();
    print_frame("collapsed", &calendar, &args);
}
