//! Locale strings consumed by the calendar and its surfaces.

/// Labels and patterns used when rendering calendar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLocale {
    /// Short weekday labels, Sunday first.
    pub weekdays: [String; 7],
    /// Full month names, January first.
    pub month_names: [String; 12],
    /// Abbreviated month names, January first.
    pub month_short_names: [String; 12],
    /// Label for the ante meridiem period.
    pub am: String,
    /// Label for the post meridiem period.
    pub pm: String,
    /// Time panel hours column title.
    pub hours: String,
    /// Time panel minutes column title.
    pub minutes: String,
    /// Time panel seconds column title.
    pub seconds: String,
    /// Pattern for the header's month title.
    pub formatted_month_pattern: String,
    /// Pattern for a day cell's title.
    pub formatted_day_pattern: String,
}

impl CalendarLocale {
    /// Weekday labels in display order.
    ///
    /// ISO weeks start on Monday, otherwise weeks start on Sunday.
    pub fn weekday_labels(&self, iso_week: bool) -> [&str; 7] {
        let start = usize::from(iso_week);
        std::array::from_fn(|idx| self.weekdays[(start + idx) % 7].as_str())
    }

    /// Full name for a month (1-12); out-of-range months are clamped.
    pub fn month_name(&self, month: u32) -> &str {
        &self.month_names[month_index(month)]
    }

    /// Abbreviated name for a month (1-12).
    pub fn month_short_name(&self, month: u32) -> &str {
        &self.month_short_names[month_index(month)]
    }

    /// Period label for an hour of day.
    pub fn meridian(&self, hour: u32) -> &str {
        if hour >= 12 { &self.pm } else { &self.am }
    }
}

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

impl Default for CalendarLocale {
    fn default() -> Self {
        Self {
            weekdays: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].map(String::from),
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
            month_short_names: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .map(String::from),
            am: "AM".to_string(),
            pm: "PM".to_string(),
            hours: "Hours".to_string(),
            minutes: "Minutes".to_string(),
            seconds: "Seconds".to_string(),
            formatted_month_pattern: "MMM yyyy".to_string(),
            formatted_day_pattern: "dd MMM yyyy".to_string(),
        }
    }
}
